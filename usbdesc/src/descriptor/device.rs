use core::mem::size_of;

use crate::config::{DeviceInfo, DEVICE_INFO};

use super::{string::StringIndex, DESC_DEVICE};

#[repr(C, packed)]
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy)]
pub struct DeviceDescriptor {
    pub bLength: u8,
    pub bDescriptorType: u8,
    pub bcdUSB: u16,
    pub bDeviceClass: u8,
    pub bDeviceSubClass: u8,
    pub bDeviceProtocol: u8,
    pub bMaxPacketSize0: u8,
    pub idVendor: u16,
    pub idProduct: u16,
    pub bcdDevice: u16,
    pub iManufacturer: u8,
    pub iProduct: u8,
    pub iSerialNumber: u8,
    pub bNumConfigurations: u8,
}

pub const DEVICE_DESCRIPTOR_LEN: usize = size_of::<DeviceDescriptor>();

pub static DEVICE_DESCRIPTOR: [u8; DEVICE_DESCRIPTOR_LEN] =
    DeviceDescriptor::new(&DEVICE_INFO).to_bytes();

impl DeviceDescriptor {
    pub const fn new(info: &DeviceInfo) -> Self {
        DeviceDescriptor {
            bLength: DEVICE_DESCRIPTOR_LEN as u8,
            bDescriptorType: DESC_DEVICE,
            bcdUSB: 0x0200, // USB 2.0
            bDeviceClass: 0,
            bDeviceSubClass: 0,
            bDeviceProtocol: 0,
            bMaxPacketSize0: info.max_packet_size_0,
            idVendor: info.vendor_id,
            idProduct: info.product_id,
            bcdDevice: info.bcd_device,
            iManufacturer: StringIndex::Manufacturer as u8,
            iProduct: StringIndex::Product as u8,
            iSerialNumber: StringIndex::SerialNumber as u8,
            bNumConfigurations: 1,
        }
    }

    /// Wire image; multi-byte fields are little-endian regardless of target.
    pub const fn to_bytes(&self) -> [u8; DEVICE_DESCRIPTOR_LEN] {
        let [usb_lo, usb_hi] = { self.bcdUSB }.to_le_bytes();
        let [vid_lo, vid_hi] = { self.idVendor }.to_le_bytes();
        let [pid_lo, pid_hi] = { self.idProduct }.to_le_bytes();
        let [dev_lo, dev_hi] = { self.bcdDevice }.to_le_bytes();
        [
            self.bLength,
            self.bDescriptorType,
            usb_lo,
            usb_hi,
            self.bDeviceClass,
            self.bDeviceSubClass,
            self.bDeviceProtocol,
            self.bMaxPacketSize0,
            vid_lo,
            vid_hi,
            pid_lo,
            pid_hi,
            dev_lo,
            dev_hi,
            self.iManufacturer,
            self.iProduct,
            self.iSerialNumber,
            self.bNumConfigurations,
        ]
    }
}
