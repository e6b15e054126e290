mod buffer;
pub mod configuration;
mod device;
pub mod hid_report;
pub mod string;

pub use buffer::DescriptorBuf;
pub use configuration::{InterfaceNumbers, CONFIGURATION_DESCRIPTOR, CONFIGURATION_TOTAL_LEN};
pub use device::{DeviceDescriptor, DEVICE_DESCRIPTOR, DEVICE_DESCRIPTOR_LEN};
pub use hid_report::{HidReports, ReportKind, HID_REPORT_DESCRIPTOR, HID_REPORT_DESCRIPTOR_LEN};
pub use string::{StringDescriptorBuffer, StringTable, STRINGS};

// bDescriptorType values
pub const DESC_DEVICE: u8 = 0x01;
pub const DESC_CONFIGURATION: u8 = 0x02;
pub const DESC_STRING: u8 = 0x03;
pub const DESC_INTERFACE: u8 = 0x04;
pub const DESC_ENDPOINT: u8 = 0x05;
pub const DESC_INTERFACE_ASSOCIATION: u8 = 0x0b;
pub const DESC_CS_INTERFACE: u8 = 0x24;
pub const DESC_HID: u8 = 0x21;
pub const DESC_HID_REPORT: u8 = 0x22;

// bInterfaceClass values
pub const CLASS_CDC: u8 = 0x02;
pub const CLASS_HID: u8 = 0x03;
pub const CLASS_MSC: u8 = 0x08;
pub const CLASS_CDC_DATA: u8 = 0x0a;

// bmAttributes transfer types
pub const XFER_BULK: u8 = 0x02;
pub const XFER_INTERRUPT: u8 = 0x03;

pub const LANG_ID_EN_US: u16 = 0x0409;

/// Returns the device descriptor.
pub fn device() -> &'static [u8] {
    trace!("device descriptor requested");
    &DEVICE_DESCRIPTOR
}

/// Returns the configuration descriptor.
///
/// Only one configuration exists, so `index` is ignored.
pub fn configuration(index: u8) -> &'static [u8] {
    trace!("configuration descriptor {} requested", index);
    &CONFIGURATION_DESCRIPTOR
}

/// Returns the HID report descriptor.
///
/// There is a single HID interface, so `instance` is ignored.
pub fn hid_report(instance: u8) -> &'static [u8] {
    trace!("HID report descriptor requested for instance {}", instance);
    &HID_REPORT_DESCRIPTOR
}
