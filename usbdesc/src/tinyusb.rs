//! Descriptor callbacks for the TinyUSB device stack.
//!
//! TinyUSB resolves these symbols at link time and calls them from its device
//! task while enumerating. Every returned pointer must stay valid until the
//! transfer completes: the tables are `static`, and the string buffer is only
//! overwritten by the next string request.

use core::{cell::RefCell, ptr};

use critical_section::Mutex;

use crate::descriptor::{self, StringDescriptorBuffer, STRINGS};

static STRING_BUFFER: Mutex<RefCell<StringDescriptorBuffer>> =
    Mutex::new(RefCell::new(StringDescriptorBuffer::new()));

/// Invoked on GET DEVICE DESCRIPTOR.
#[no_mangle]
pub extern "C" fn tud_descriptor_device_cb() -> *const u8 {
    descriptor::device().as_ptr()
}

/// Invoked on GET CONFIGURATION DESCRIPTOR.
#[no_mangle]
pub extern "C" fn tud_descriptor_configuration_cb(index: u8) -> *const u8 {
    descriptor::configuration(index).as_ptr()
}

/// Invoked on GET HID REPORT DESCRIPTOR.
#[cfg(feature = "hid")]
#[no_mangle]
pub extern "C" fn tud_hid_descriptor_report_cb(instance: u8) -> *const u8 {
    descriptor::hid_report(instance).as_ptr()
}

/// Invoked on GET STRING DESCRIPTOR. Returns null for an unknown index, which
/// makes the stack stall the request.
#[no_mangle]
pub extern "C" fn tud_descriptor_string_cb(index: u8, langid: u16) -> *const u16 {
    critical_section::with(|cs| {
        let mut buffer = STRING_BUFFER.borrow_ref_mut(cs);
        match buffer.load(&STRINGS, index, langid) {
            Ok(descriptor) => descriptor.as_ptr(),
            Err(_) => ptr::null(),
        }
    })
}

#[cfg(test)]
mod tests {
    use core::slice;

    use super::*;
    use crate::descriptor::{
        CONFIGURATION_DESCRIPTOR, CONFIGURATION_TOTAL_LEN, DEVICE_DESCRIPTOR,
        DEVICE_DESCRIPTOR_LEN, DESC_STRING,
    };

    /// Reads a string descriptor the way the stack does: length from the header.
    fn read_string(ptr: *const u16) -> Vec<u16> {
        let header = unsafe { *ptr };
        assert_eq!(header >> 8, DESC_STRING as u16);
        let units = (header & 0xff) as usize / 2;
        unsafe { slice::from_raw_parts(ptr, units) }.to_vec()
    }

    #[test]
    fn device_callback_points_at_device_descriptor() {
        let ptr = tud_descriptor_device_cb();
        let bytes = unsafe { slice::from_raw_parts(ptr, DEVICE_DESCRIPTOR_LEN) };
        assert_eq!(bytes, &DEVICE_DESCRIPTOR);
        assert_eq!(bytes[0] as usize, DEVICE_DESCRIPTOR_LEN);
    }

    #[test]
    fn configuration_callback_ignores_index() {
        let first = tud_descriptor_configuration_cb(0);
        assert_eq!(first, tud_descriptor_configuration_cb(1));
        let bytes = unsafe { slice::from_raw_parts(first, CONFIGURATION_TOTAL_LEN) };
        assert_eq!(bytes, &CONFIGURATION_DESCRIPTOR);
    }

    #[cfg(feature = "hid")]
    #[test]
    fn hid_callback_points_at_report_descriptor() {
        assert_eq!(
            tud_hid_descriptor_report_cb(0),
            descriptor::HID_REPORT_DESCRIPTOR.as_ptr()
        );
    }

    #[test]
    fn string_callback_serves_table_and_rejects_out_of_range() {
        assert_eq!(read_string(tud_descriptor_string_cb(0, 0)), [0x0304, 0x0409]);

        let manufacturer = read_string(tud_descriptor_string_cb(1, 0x0409));
        let expected: Vec<u16> = crate::DEVICE_INFO
            .manufacturer
            .encode_utf16()
            .take(31)
            .collect();
        assert_eq!(&manufacturer[1..], expected.as_slice());

        assert!(tud_descriptor_string_cb(STRINGS.len() as u8, 0x0409).is_null());
        assert!(tud_descriptor_string_cb(0xee, 0x0409).is_null());
    }
}
