use crate::config::{Classes, DeviceInfo, DEVICE_INFO};

use super::{
    hid_report::HID_REPORT_DESCRIPTOR_LEN, string::StringIndex, DescriptorBuf, CLASS_CDC,
    CLASS_CDC_DATA, CLASS_HID, CLASS_MSC, DESC_CONFIGURATION, DESC_CS_INTERFACE, DESC_ENDPOINT,
    DESC_HID, DESC_HID_REPORT, DESC_INTERFACE, DESC_INTERFACE_ASSOCIATION, XFER_BULK,
    XFER_INTERRUPT,
};

pub const CONFIG_DESC_LEN: usize = 9;
pub const CDC_DESC_LEN: usize = 66;
pub const MSC_DESC_LEN: usize = 23;
pub const HID_DESC_LEN: usize = 25;

pub const EP_CDC_NOTIF: u8 = 0x81;
pub const EP_CDC_OUT: u8 = 0x02;
pub const EP_CDC_IN: u8 = 0x82;
pub const EP_MSC_OUT: u8 = 0x03;
pub const EP_MSC_IN: u8 = 0x83;
pub const EP_HID: u8 = 0x84;

const CDC_NOTIF_EP_SIZE: u16 = 8;
const CDC_NOTIF_INTERVAL: u8 = 16;
const BULK_EP_SIZE: u16 = 64;
pub const HID_EP_SIZE: u16 = 16;
const HID_POLL_INTERVAL: u8 = 5;

const ATTR_BUS_POWERED: u8 = 0x80;
const ATTR_REMOTE_WAKEUP: u8 = 0x20;

pub const CONFIGURATION_TOTAL_LEN: usize = total_len(Classes::ENABLED);

pub static CONFIGURATION_DESCRIPTOR: [u8; CONFIGURATION_TOTAL_LEN] =
    build(Classes::ENABLED, &DEVICE_INFO, HID_REPORT_DESCRIPTOR_LEN as u16).into_array();

/// Interface numbers, assigned in the order CDC control, CDC data, MSC, HID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterfaceNumbers {
    /// CDC communication interface; the data interface follows it.
    pub cdc: Option<u8>,
    pub msc: Option<u8>,
    pub hid: Option<u8>,
    pub total: u8,
}

impl InterfaceNumbers {
    pub const fn new(classes: Classes) -> Self {
        let mut next = 0;
        let cdc = if classes.cdc {
            next += 2;
            Some(next - 2)
        } else {
            None
        };
        let msc = if classes.msc {
            next += 1;
            Some(next - 1)
        } else {
            None
        };
        let hid = if classes.hid {
            next += 1;
            Some(next - 1)
        } else {
            None
        };
        InterfaceNumbers {
            cdc,
            msc,
            hid,
            total: next,
        }
    }
}

pub const fn total_len(classes: Classes) -> usize {
    let mut len = CONFIG_DESC_LEN;
    if classes.cdc {
        len += CDC_DESC_LEN;
    }
    if classes.msc {
        len += MSC_DESC_LEN;
    }
    if classes.hid {
        len += HID_DESC_LEN;
    }
    len
}

/// Full-speed configuration descriptor with the functions in `classes`.
pub const fn build<const N: usize>(
    classes: Classes,
    info: &DeviceInfo,
    hid_report_len: u16,
) -> DescriptorBuf<N> {
    assert!(info.max_power_ma <= 500, "bMaxPower is limited to 500 mA");
    let interfaces = InterfaceNumbers::new(classes);
    let attributes = if info.remote_wakeup {
        ATTR_BUS_POWERED | ATTR_REMOTE_WAKEUP
    } else {
        ATTR_BUS_POWERED
    };

    let mut buf = DescriptorBuf::new()
        .push(CONFIG_DESC_LEN as u8)
        .push(DESC_CONFIGURATION)
        .push_u16(0) // wTotalLength, patched below
        .push(interfaces.total)
        .push(1) // bConfigurationValue
        .push(0) // iConfiguration
        .push(attributes)
        .push((info.max_power_ma / 2) as u8);
    if let Some(itf) = interfaces.cdc {
        buf = cdc(buf, itf);
    }
    if let Some(itf) = interfaces.msc {
        buf = msc(buf, itf);
    }
    if let Some(itf) = interfaces.hid {
        buf = hid(buf, itf, hid_report_len);
    }
    let total = buf.len() as u16;
    buf.set_u16(2, total)
}

const fn interface<const N: usize>(
    buf: DescriptorBuf<N>,
    number: u8,
    endpoints: u8,
    class: u8,
    subclass: u8,
    protocol: u8,
    string: StringIndex,
) -> DescriptorBuf<N> {
    buf.push(9)
        .push(DESC_INTERFACE)
        .push(number)
        .push(0) // bAlternateSetting
        .push(endpoints)
        .push(class)
        .push(subclass)
        .push(protocol)
        .push(string as u8)
}

const fn endpoint<const N: usize>(
    buf: DescriptorBuf<N>,
    address: u8,
    transfer: u8,
    max_packet_size: u16,
    interval: u8,
) -> DescriptorBuf<N> {
    buf.push(7)
        .push(DESC_ENDPOINT)
        .push(address)
        .push(transfer)
        .push_u16(max_packet_size)
        .push(interval)
}

/// CDC ACM: interface association, communication and data interfaces.
const fn cdc<const N: usize>(buf: DescriptorBuf<N>, itf: u8) -> DescriptorBuf<N> {
    const SUBCLASS_ACM: u8 = 0x02;
    const FUNC_HEADER: u8 = 0x00;
    const FUNC_CALL_MANAGEMENT: u8 = 0x01;
    const FUNC_ACM: u8 = 0x02;
    const FUNC_UNION: u8 = 0x06;

    let buf = buf
        .push(8)
        .push(DESC_INTERFACE_ASSOCIATION)
        .push(itf)
        .push(2) // bInterfaceCount
        .push(CLASS_CDC)
        .push(SUBCLASS_ACM)
        .push(0) // no protocol
        .push(0);
    let buf = interface(buf, itf, 1, CLASS_CDC, SUBCLASS_ACM, 0, StringIndex::CdcInterface);
    let buf = buf
        .push(5)
        .push(DESC_CS_INTERFACE)
        .push(FUNC_HEADER)
        .push_u16(0x0120) // bcdCDC 1.20
        .push(5)
        .push(DESC_CS_INTERFACE)
        .push(FUNC_CALL_MANAGEMENT)
        .push(0)
        .push(itf + 1)
        .push(4)
        .push(DESC_CS_INTERFACE)
        .push(FUNC_ACM)
        .push(0x02) // line coding and serial state
        .push(5)
        .push(DESC_CS_INTERFACE)
        .push(FUNC_UNION)
        .push(itf)
        .push(itf + 1);
    let buf = endpoint(
        buf,
        EP_CDC_NOTIF,
        XFER_INTERRUPT,
        CDC_NOTIF_EP_SIZE,
        CDC_NOTIF_INTERVAL,
    );
    let buf = buf
        .push(9)
        .push(DESC_INTERFACE)
        .push(itf + 1)
        .push(0)
        .push(2)
        .push(CLASS_CDC_DATA)
        .push(0)
        .push(0)
        .push(0);
    let buf = endpoint(buf, EP_CDC_OUT, XFER_BULK, BULK_EP_SIZE, 0);
    endpoint(buf, EP_CDC_IN, XFER_BULK, BULK_EP_SIZE, 0)
}

/// Mass storage, SCSI transparent command set over bulk-only transport.
const fn msc<const N: usize>(buf: DescriptorBuf<N>, itf: u8) -> DescriptorBuf<N> {
    const SUBCLASS_SCSI: u8 = 0x06;
    const PROTOCOL_BOT: u8 = 0x50;

    let buf = interface(
        buf,
        itf,
        2,
        CLASS_MSC,
        SUBCLASS_SCSI,
        PROTOCOL_BOT,
        StringIndex::MscInterface,
    );
    let buf = endpoint(buf, EP_MSC_OUT, XFER_BULK, BULK_EP_SIZE, 0);
    endpoint(buf, EP_MSC_IN, XFER_BULK, BULK_EP_SIZE, 0)
}

/// HID without boot protocol and a single interrupt IN endpoint.
const fn hid<const N: usize>(
    buf: DescriptorBuf<N>,
    itf: u8,
    report_len: u16,
) -> DescriptorBuf<N> {
    let buf = interface(buf, itf, 1, CLASS_HID, 0, 0, StringIndex::HidInterface);
    let buf = buf
        .push(9)
        .push(DESC_HID)
        .push_u16(0x0111) // bcdHID 1.11
        .push(0) // bCountryCode
        .push(1) // bNumDescriptors
        .push(DESC_HID_REPORT)
        .push_u16(report_len);
    endpoint(buf, EP_HID, XFER_INTERRUPT, HID_EP_SIZE, HID_POLL_INTERVAL)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: Classes = Classes {
        cdc: true,
        msc: true,
        hid: true,
    };

    fn descriptor(classes: Classes) -> DescriptorBuf<256> {
        build(classes, &DEVICE_INFO, 239)
    }

    #[test]
    fn numbers_interfaces_over_enabled_classes() {
        assert_eq!(
            InterfaceNumbers::new(ALL),
            InterfaceNumbers {
                cdc: Some(0),
                msc: Some(2),
                hid: Some(3),
                total: 4
            }
        );
        let without_cdc = Classes { cdc: false, ..ALL };
        assert_eq!(
            InterfaceNumbers::new(without_cdc),
            InterfaceNumbers {
                cdc: None,
                msc: Some(0),
                hid: Some(1),
                total: 2
            }
        );
    }

    #[test]
    fn header_describes_whole_configuration() {
        let buf = descriptor(ALL);
        assert_eq!(buf.len(), total_len(ALL));
        assert_eq!(buf.len(), 123);
        assert_eq!(&buf.as_slice()[..9], &[9, 0x02, 123, 0, 4, 1, 0, 0xa0, 50]);
    }

    #[test]
    fn descriptor_chain_sums_to_total_length() {
        for classes in [
            ALL,
            Classes { cdc: false, ..ALL },
            Classes { msc: false, ..ALL },
            Classes { hid: false, ..ALL },
        ] {
            let buf = descriptor(classes);
            let bytes = buf.as_slice();
            let mut offset = 0;
            while offset < bytes.len() {
                assert_ne!(bytes[offset], 0);
                offset += bytes[offset] as usize;
            }
            assert_eq!(offset, total_len(classes));
            assert_eq!(u16::from_le_bytes([bytes[2], bytes[3]]) as usize, offset);
        }
    }

    #[test]
    fn cdc_function_binds_both_interfaces() {
        let buf = descriptor(ALL);
        let cdc = &buf.as_slice()[9..9 + CDC_DESC_LEN];
        assert_eq!(&cdc[..8], &[8, 0x0b, 0, 2, 0x02, 0x02, 0, 0]);
        // union functional descriptor
        assert_eq!(&cdc[31..36], &[5, 0x24, 0x06, 0, 1]);
        assert_eq!(&cdc[36..43], &[7, 0x05, 0x81, 0x03, 8, 0, 16]);
        assert_eq!(&cdc[52..], &[7, 0x05, 0x02, 0x02, 64, 0, 0, 7, 0x05, 0x82, 0x02, 64, 0, 0]);
    }

    #[test]
    fn msc_function_uses_bulk_only_transport() {
        let buf = descriptor(ALL);
        let start = 9 + CDC_DESC_LEN;
        assert_eq!(
            &buf.as_slice()[start..start + MSC_DESC_LEN],
            &[
                9, 0x04, 2, 0, 2, 0x08, 0x06, 0x50, 5, 7, 0x05, 0x03, 0x02, 64, 0, 0, 7, 0x05, 0x83,
                0x02, 64, 0, 0
            ]
        );
    }

    #[test]
    fn hid_function_points_at_report_descriptor() {
        let buf = descriptor(ALL);
        let start = 9 + CDC_DESC_LEN + MSC_DESC_LEN;
        assert_eq!(
            &buf.as_slice()[start..],
            &[
                9, 0x04, 3, 0, 1, 0x03, 0, 0, 6, 9, 0x21, 0x11, 0x01, 0, 1, 0x22, 239, 0, 7, 0x05,
                0x84, 0x03, 16, 0, 5
            ]
        );
    }

    #[test]
    fn omits_remote_wakeup_when_disabled() {
        let info = DeviceInfo {
            remote_wakeup: false,
            max_power_ma: 500,
            ..DEVICE_INFO
        };
        let buf = build::<256>(Classes { cdc: false, msc: false, hid: false }, &info, 0);
        assert_eq!(buf.as_slice(), &[9, 0x02, 9, 0, 0, 1, 0, 0x80, 250]);
    }

    #[test]
    fn enabled_configuration_matches_features() {
        assert_eq!(CONFIGURATION_DESCRIPTOR.len(), total_len(Classes::ENABLED));
        assert_eq!(
            CONFIGURATION_DESCRIPTOR[4],
            InterfaceNumbers::new(Classes::ENABLED).total
        );
    }
}
