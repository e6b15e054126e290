//! Compile-time device identity and function selection.
//!
//! The identity can be overridden at build time through environment variables:
//!
//! | variable | field |
//! |---|---|
//! | `USBDESC_VID` | [`DeviceInfo::vendor_id`] (decimal or `0x`-prefixed hex) |
//! | `USBDESC_PID` | [`DeviceInfo::product_id`] |
//! | `USBDESC_MANUFACTURER` | [`DeviceInfo::manufacturer`] |
//! | `USBDESC_PRODUCT` | [`DeviceInfo::product_name`] |
//! | `USBDESC_SERIAL` | [`DeviceInfo::serial_number`] |

macro_rules! id_from_env_or {
    ($env_var:literal, $default:expr) => {
        if let Some(str_value) = option_env!($env_var) {
            if let Some(value) = parse_id(str_value) {
                value
            } else {
                const_panic::concat_panic!(
                    "Could not parse environment variable `",
                    $env_var,
                    "=",
                    str_value,
                    "` as a 16-bit USB identifier",
                );
            }
        } else {
            $default
        }
    };
}

macro_rules! str_from_env_or {
    ($env_var:literal, $default:expr) => {
        match option_env!($env_var) {
            Some(value) => value,
            None => $default,
        }
    };
}

#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub vendor_id: u16,
    pub product_id: u16,
    /// Device release number in BCD.
    pub bcd_device: u16,
    pub max_packet_size_0: u8,
    pub max_power_ma: u16,
    pub remote_wakeup: bool,
    pub manufacturer: &'static str,
    pub product_name: &'static str,
    pub serial_number: &'static str,
    pub cdc_interface: &'static str,
    pub msc_interface: &'static str,
    pub hid_interface: &'static str,
}

pub const DEVICE_INFO: DeviceInfo = DeviceInfo {
    vendor_id: id_from_env_or!("USBDESC_VID", 0xcafe),
    product_id: id_from_env_or!("USBDESC_PID", 0x4000),
    bcd_device: 0x0100,
    max_packet_size_0: 64,
    max_power_ma: 100,
    remote_wakeup: true,
    manufacturer: str_from_env_or!("USBDESC_MANUFACTURER", "TinyUSB"),
    product_name: str_from_env_or!("USBDESC_PRODUCT", "TinyUSB Device"),
    serial_number: str_from_env_or!("USBDESC_SERIAL", "123456"),
    cdc_interface: "TinyUSB CDC",
    msc_interface: "TinyUSB MSC",
    hid_interface: "TinyUSB HID",
};

/// USB functions present in the configuration descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Classes {
    pub cdc: bool,
    pub msc: bool,
    pub hid: bool,
}

impl Classes {
    pub const ENABLED: Classes = Classes {
        cdc: cfg!(feature = "cdc"),
        msc: cfg!(feature = "msc"),
        hid: cfg!(feature = "hid"),
    };
}

/// Parses a decimal or `0x`-prefixed hexadecimal 16-bit identifier.
pub const fn parse_id(s: &str) -> Option<u16> {
    let bytes = s.as_bytes();
    if bytes.len() > 2 && bytes[0] == b'0' && (bytes[1] == b'x' || bytes[1] == b'X') {
        let mut value: u32 = 0;
        let mut i = 2;
        while i < bytes.len() {
            let digit = match bytes[i] {
                b'0'..=b'9' => bytes[i] - b'0',
                b'a'..=b'f' => bytes[i] - b'a' + 10,
                b'A'..=b'F' => bytes[i] - b'A' + 10,
                _ => return None,
            };
            value = value * 16 + digit as u32;
            if value > u16::MAX as u32 {
                return None;
            }
            i += 1;
        }
        Some(value as u16)
    } else {
        match konst::primitive::parse_u16(s) {
            Ok(value) => Some(value),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_decimal_ids() {
        assert_eq!(parse_id("0xCafe"), Some(0xcafe));
        assert_eq!(parse_id("0X4000"), Some(0x4000));
        assert_eq!(parse_id("1155"), Some(1155));
    }

    #[test]
    fn rejects_malformed_ids() {
        assert_eq!(parse_id("0x"), None);
        assert_eq!(parse_id("0x10000"), None);
        assert_eq!(parse_id("0xgg"), None);
        assert_eq!(parse_id("65536"), None);
        assert_eq!(parse_id(""), None);
    }

    #[test]
    fn enabled_classes_follow_features() {
        assert_eq!(Classes::ENABLED.cdc, cfg!(feature = "cdc"));
        assert_eq!(Classes::ENABLED.msc, cfg!(feature = "msc"));
        assert_eq!(Classes::ENABLED.hid, cfg!(feature = "hid"));
    }
}
