use crate::descriptor::hid_report::ReportKind;

#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    UnknownStringIndex {
        index: u8,
    },
    ReportDisabled {
        kind: ReportKind,
    },
    BufferTooSmall {
        needed: usize,
    },
    #[cfg(feature = "usb-device")]
    Usb(usb_device::UsbError),
    #[cfg(feature = "usb-device")]
    UsbBuilder(#[cfg_attr(feature = "defmt", defmt(Debug2Format))] usb_device::prelude::BuilderError),
}

#[cfg(feature = "usb-device")]
impl From<usb_device::UsbError> for Error {
    fn from(error: usb_device::UsbError) -> Self {
        Error::Usb(error)
    }
}

#[cfg(feature = "usb-device")]
impl From<usb_device::prelude::BuilderError> for Error {
    fn from(error: usb_device::prelude::BuilderError) -> Self {
        Error::UsbBuilder(error)
    }
}
