//! The HID function on the `usb-device` stack.
//!
//! `usb-device` composes its own device and configuration descriptors; this
//! module feeds it the same identity, strings and report descriptor the
//! TinyUSB callbacks serve.

use usb_device::{
    class_prelude::{UsbBus, UsbBusAllocator},
    device::{StringDescriptors, UsbDevice, UsbDeviceBuilder, UsbDeviceState, UsbVidPid},
    LangID, UsbError,
};
use usbd_hid::hid_class::HIDClass;

use crate::{
    config::DeviceInfo,
    descriptor::{HidReports, ReportKind, HID_REPORT_DESCRIPTOR},
    report::{frame, InputReport, MAX_REPORT_FRAME},
    Error,
};

const HID_POLL_MS: u8 = 5;

pub struct HidDevice<'a, B: UsbBus> {
    usb_device: UsbDevice<'a, B>,
    hid: HIDClass<'a, B>,
}

impl<'a, B: UsbBus> HidDevice<'a, B> {
    pub fn new(
        device_info: &DeviceInfo,
        usb_bus_alloc: &'a UsbBusAllocator<B>,
    ) -> Result<HidDevice<'a, B>, Error> {
        let hid = HIDClass::new(usb_bus_alloc, &HID_REPORT_DESCRIPTOR, HID_POLL_MS);
        let descriptors = StringDescriptors::new(LangID::EN_US)
            .manufacturer(device_info.manufacturer)
            .product(device_info.product_name)
            .serial_number(device_info.serial_number);
        let usb_device = UsbDeviceBuilder::new(
            usb_bus_alloc,
            UsbVidPid(device_info.vendor_id, device_info.product_id),
        )
        .strings(&[descriptors])?
        .max_packet_size_0(device_info.max_packet_size_0)?
        .max_power(device_info.max_power_ma as usize)?
        .device_release(device_info.bcd_device)
        .supports_remote_wakeup(device_info.remote_wakeup)
        .device_class(0)
        .build();
        debug!(
            "HID device {=u16:#x}:{=u16:#x} created",
            device_info.vendor_id,
            device_info.product_id
        );

        Ok(HidDevice { usb_device, hid })
    }

    pub fn poll(&mut self) -> bool {
        self.usb_device.poll(&mut [&mut self.hid])
    }

    pub fn state(&self) -> UsbDeviceState {
        self.usb_device.state()
    }

    pub fn is_ready(&self) -> bool {
        self.usb_device.state() == UsbDeviceState::Configured
    }

    /// Queues `report` on the interrupt IN endpoint. Does nothing until the
    /// host has configured the device. A busy endpoint is reported as
    /// `Error::Usb(UsbError::WouldBlock)`; the report was not queued.
    pub fn push<R: InputReport>(&self, report: &R) -> Result<(), Error> {
        if !self.is_ready() {
            return Ok(());
        }
        let mut buf = [0u8; MAX_REPORT_FRAME];
        let len = frame(&HidReports::ENABLED, report, &mut buf)?;
        self.hid.push_raw_input(&buf[..len])?;
        Ok(())
    }

    /// Reads a pending keyboard LED output report: Num Lock in bit 0, then
    /// Caps Lock, Scroll Lock, Compose and Kana.
    pub fn keyboard_leds(&self) -> Result<Option<u8>, Error> {
        let Some(id) = HidReports::ENABLED.report_id(ReportKind::Keyboard) else {
            return Err(Error::ReportDisabled {
                kind: ReportKind::Keyboard,
            });
        };
        let mut buf = [0u8; 2];
        match self.hid.pull_raw_output(&mut buf) {
            Ok(2) if buf[0] == id => Ok(Some(buf[1] & 0x1f)),
            Ok(_) | Err(UsbError::WouldBlock) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
