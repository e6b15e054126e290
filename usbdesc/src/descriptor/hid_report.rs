//! Composite HID report descriptor.
//!
//! Each report is an application collection; the Report ID item is inserted
//! right after the collection opens, so every template is split into the
//! 6-byte collection head and the body that follows.

use super::DescriptorBuf;

const COLLECTION_HEAD_LEN: usize = 6;
const REPORT_ID_ITEM: u8 = 0x85;

#[rustfmt::skip]
const KEYBOARD_HEAD: [u8; COLLECTION_HEAD_LEN] = [
    0x05, 0x01,       // Usage Page (Generic Desktop)
    0x09, 0x06,       // Usage (Keyboard)
    0xa1, 0x01,       // Collection (Application)
];

#[rustfmt::skip]
const KEYBOARD_BODY: [u8; 59] = [
    // 8 modifier bits
    0x05, 0x07, 0x19, 0xe0, 0x29, 0xe7, 0x15, 0x00, 0x25, 0x01, 0x95, 0x08, 0x75, 0x01, 0x81, 0x02,
    // reserved byte
    0x95, 0x01, 0x75, 0x08, 0x81, 0x01,
    // LED output: Num Lock, Caps Lock, Scroll Lock, Compose, Kana
    0x05, 0x08, 0x19, 0x01, 0x29, 0x05, 0x95, 0x05, 0x75, 0x01, 0x91, 0x02,
    // LED padding
    0x95, 0x01, 0x75, 0x03, 0x91, 0x01,
    // 6 key codes
    0x05, 0x07, 0x19, 0x00, 0x2a, 0xff, 0x00, 0x15, 0x00, 0x26, 0xff, 0x00, 0x95, 0x06, 0x75, 0x08,
    0x81, 0x00,
    0xc0,             // End Collection
];

#[rustfmt::skip]
const MOUSE_HEAD: [u8; COLLECTION_HEAD_LEN] = [
    0x05, 0x01,       // Usage Page (Generic Desktop)
    0x09, 0x02,       // Usage (Mouse)
    0xa1, 0x01,       // Collection (Application)
];

#[rustfmt::skip]
const MOUSE_BODY: [u8; 71] = [
    0x09, 0x01, 0xa1, 0x00, // Usage (Pointer), Collection (Physical)
    // 5 buttons
    0x05, 0x09, 0x19, 0x01, 0x29, 0x05, 0x15, 0x00, 0x25, 0x01, 0x95, 0x05, 0x75, 0x01, 0x81, 0x02,
    // button padding
    0x95, 0x01, 0x75, 0x03, 0x81, 0x01,
    // X, Y relative
    0x05, 0x01, 0x09, 0x30, 0x09, 0x31, 0x15, 0x81, 0x25, 0x7f, 0x75, 0x08, 0x95, 0x02, 0x81, 0x06,
    // wheel
    0x09, 0x38, 0x15, 0x81, 0x25, 0x7f, 0x95, 0x01, 0x75, 0x08, 0x81, 0x06,
    // AC Pan
    0x05, 0x0c, 0x0a, 0x38, 0x02, 0x15, 0x81, 0x25, 0x7f, 0x95, 0x01, 0x75, 0x08, 0x81, 0x06,
    0xc0, 0xc0,       // End Collection x2
];

#[rustfmt::skip]
const CONSUMER_HEAD: [u8; COLLECTION_HEAD_LEN] = [
    0x05, 0x0c,       // Usage Page (Consumer)
    0x09, 0x01,       // Usage (Consumer Control)
    0xa1, 0x01,       // Collection (Application)
];

#[rustfmt::skip]
const CONSUMER_BODY: [u8; 17] = [
    // one 16-bit usage, 0..0x3ff
    0x15, 0x00, 0x26, 0xff, 0x03, 0x19, 0x00, 0x2a, 0xff, 0x03, 0x95, 0x01, 0x75, 0x10, 0x81, 0x00,
    0xc0,             // End Collection
];

#[rustfmt::skip]
const GAMEPAD_HEAD: [u8; COLLECTION_HEAD_LEN] = [
    0x05, 0x01,       // Usage Page (Generic Desktop)
    0x09, 0x05,       // Usage (Game Pad)
    0xa1, 0x01,       // Collection (Application)
];

#[rustfmt::skip]
const GAMEPAD_BODY: [u8; 60] = [
    // X, Y, Z, Rz, Rx, Ry: -127..127
    0x05, 0x01, 0x09, 0x30, 0x09, 0x31, 0x09, 0x32, 0x09, 0x35, 0x09, 0x33, 0x09, 0x34, 0x15, 0x81,
    0x25, 0x7f, 0x95, 0x06, 0x75, 0x08, 0x81, 0x02,
    // hat switch: 1..8, 0..315 degrees
    0x05, 0x01, 0x09, 0x39, 0x15, 0x01, 0x25, 0x08, 0x35, 0x00, 0x46, 0x3b, 0x01, 0x95, 0x01, 0x75,
    0x08, 0x81, 0x02,
    // 32 buttons
    0x05, 0x09, 0x19, 0x01, 0x29, 0x20, 0x15, 0x00, 0x25, 0x01, 0x95, 0x20, 0x75, 0x01, 0x81, 0x02,
    0xc0,             // End Collection
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportKind {
    Keyboard,
    Mouse,
    Consumer,
    Gamepad,
}

impl ReportKind {
    /// Report ID assignment order.
    pub const ALL: [ReportKind; 4] = [
        ReportKind::Keyboard,
        ReportKind::Mouse,
        ReportKind::Consumer,
        ReportKind::Gamepad,
    ];

    const fn body(self) -> &'static [u8] {
        match self {
            ReportKind::Keyboard => &KEYBOARD_BODY,
            ReportKind::Mouse => &MOUSE_BODY,
            ReportKind::Consumer => &CONSUMER_BODY,
            ReportKind::Gamepad => &GAMEPAD_BODY,
        }
    }

    const fn head(self) -> &'static [u8; COLLECTION_HEAD_LEN] {
        match self {
            ReportKind::Keyboard => &KEYBOARD_HEAD,
            ReportKind::Mouse => &MOUSE_HEAD,
            ReportKind::Consumer => &CONSUMER_HEAD,
            ReportKind::Gamepad => &GAMEPAD_HEAD,
        }
    }

    /// Length of this report's descriptor including its Report ID item.
    pub const fn descriptor_len(self) -> usize {
        COLLECTION_HEAD_LEN + 2 + self.body().len()
    }
}

/// Reports present in the composite report descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HidReports {
    pub keyboard: bool,
    pub mouse: bool,
    pub consumer: bool,
    pub gamepad: bool,
}

pub const HID_REPORT_DESCRIPTOR_LEN: usize = HidReports::ENABLED.descriptor_len();

pub static HID_REPORT_DESCRIPTOR: [u8; HID_REPORT_DESCRIPTOR_LEN] = HidReports::ENABLED
    .descriptor::<HID_REPORT_DESCRIPTOR_LEN>()
    .into_array();

impl HidReports {
    pub const ENABLED: HidReports = HidReports {
        keyboard: cfg!(feature = "hid-keyboard"),
        mouse: cfg!(feature = "hid-mouse"),
        consumer: cfg!(feature = "hid-consumer"),
        gamepad: cfg!(feature = "hid-gamepad"),
    };

    pub const fn contains(&self, kind: ReportKind) -> bool {
        match kind {
            ReportKind::Keyboard => self.keyboard,
            ReportKind::Mouse => self.mouse,
            ReportKind::Consumer => self.consumer,
            ReportKind::Gamepad => self.gamepad,
        }
    }

    /// Report ID of `kind`, numbered from 1 over the enabled reports.
    pub const fn report_id(&self, kind: ReportKind) -> Option<u8> {
        if !self.contains(kind) {
            return None;
        }
        let mut id = 0;
        let mut i = 0;
        while i < ReportKind::ALL.len() {
            let other = ReportKind::ALL[i];
            if self.contains(other) {
                id += 1;
            }
            if other as u8 == kind as u8 {
                break;
            }
            i += 1;
        }
        Some(id)
    }

    pub const fn descriptor_len(&self) -> usize {
        let mut len = 0;
        let mut i = 0;
        while i < ReportKind::ALL.len() {
            let kind = ReportKind::ALL[i];
            if self.contains(kind) {
                len += kind.descriptor_len();
            }
            i += 1;
        }
        len
    }

    pub const fn descriptor<const N: usize>(&self) -> DescriptorBuf<N> {
        let mut buf = DescriptorBuf::new();
        let mut i = 0;
        while i < ReportKind::ALL.len() {
            let kind = ReportKind::ALL[i];
            if let Some(id) = self.report_id(kind) {
                buf = buf
                    .extend(kind.head())
                    .push(REPORT_ID_ITEM)
                    .push(id)
                    .extend(kind.body());
            }
            i += 1;
        }
        buf
    }
}
