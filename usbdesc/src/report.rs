//! Input report payloads matching the composite report descriptor.

use crate::{
    descriptor::{HidReports, ReportKind},
    Error,
};

/// Largest framed report: report ID plus the gamepad payload.
pub const MAX_REPORT_FRAME: usize = 1 + GamepadReport::SIZE;

pub trait InputReport {
    const KIND: ReportKind;
    const SIZE: usize;

    /// Writes the payload into `buf`, which is at least `SIZE` bytes long.
    fn serialize(&self, buf: &mut [u8]);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardReport {
    pub modifier: u8,
    pub key_codes: [u8; 6],
}

impl KeyboardReport {
    const ROLLOVER: usize = 6;

    /// Fills the key-code slots in order; codes past the sixth are dropped.
    pub fn from_codes(modifier: u8, codes: &[u8]) -> Self {
        let mut report = KeyboardReport {
            modifier,
            ..Default::default()
        };
        codes
            .iter()
            .take(Self::ROLLOVER)
            .enumerate()
            .for_each(|(i, c)| report.key_codes[i] = *c);
        report
    }
}

impl InputReport for KeyboardReport {
    const KIND: ReportKind = ReportKind::Keyboard;
    const SIZE: usize = 8;

    fn serialize(&self, buf: &mut [u8]) {
        buf[0] = self.modifier;
        buf[1] = 0;
        buf[2..8].copy_from_slice(&self.key_codes);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseReport {
    /// Buttons 1 to 5 in bits 0 to 4.
    pub buttons: u8,
    pub x: i8,
    pub y: i8,
    pub wheel: i8,
    pub pan: i8,
}

impl InputReport for MouseReport {
    const KIND: ReportKind = ReportKind::Mouse;
    const SIZE: usize = 5;

    fn serialize(&self, buf: &mut [u8]) {
        buf[0] = self.buttons & 0x1f;
        buf[1] = self.x as u8;
        buf[2] = self.y as u8;
        buf[3] = self.wheel as u8;
        buf[4] = self.pan as u8;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConsumerReport {
    /// Consumer page usage, 0 when released.
    pub usage: u16,
}

impl InputReport for ConsumerReport {
    const KIND: ReportKind = ReportKind::Consumer;
    const SIZE: usize = 2;

    fn serialize(&self, buf: &mut [u8]) {
        buf[..2].copy_from_slice(&self.usage.to_le_bytes());
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Hat {
    #[default]
    Centered = 0,
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GamepadReport {
    pub x: i8,
    pub y: i8,
    pub z: i8,
    pub rz: i8,
    pub rx: i8,
    pub ry: i8,
    pub hat: Hat,
    pub buttons: u32,
}

impl InputReport for GamepadReport {
    const KIND: ReportKind = ReportKind::Gamepad;
    const SIZE: usize = 11;

    fn serialize(&self, buf: &mut [u8]) {
        let axes = [self.x, self.y, self.z, self.rz, self.rx, self.ry];
        axes.iter()
            .zip(buf.iter_mut())
            .for_each(|(axis, dst)| *dst = *axis as u8);
        buf[6] = self.hat as u8;
        buf[7..11].copy_from_slice(&self.buttons.to_le_bytes());
    }
}

/// Writes `report` prefixed by its report ID and returns the frame length.
pub fn frame<R: InputReport>(
    reports: &HidReports,
    report: &R,
    buf: &mut [u8],
) -> Result<usize, Error> {
    let Some(id) = reports.report_id(R::KIND) else {
        return Err(Error::ReportDisabled { kind: R::KIND });
    };
    let needed = 1 + R::SIZE;
    if buf.len() < needed {
        return Err(Error::BufferTooSmall { needed });
    }
    buf[0] = id;
    report.serialize(&mut buf[1..needed]);
    Ok(needed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_REPORTS: HidReports = HidReports {
        keyboard: true,
        mouse: true,
        consumer: true,
        gamepad: true,
    };

    #[test]
    fn keyboard_report_keeps_six_codes() {
        let report = KeyboardReport::from_codes(0x02, &[4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(report.key_codes, [4, 5, 6, 7, 8, 9]);

        let mut buf = [0u8; MAX_REPORT_FRAME];
        let len = frame(&ALL_REPORTS, &report, &mut buf).unwrap();
        assert_eq!(&buf[..len], &[1, 0x02, 0, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn mouse_report_is_signed_relative() {
        let report = MouseReport {
            buttons: 0xff,
            x: -1,
            y: 127,
            wheel: -127,
            pan: 0,
        };
        let mut buf = [0u8; MAX_REPORT_FRAME];
        let len = frame(&ALL_REPORTS, &report, &mut buf).unwrap();
        assert_eq!(&buf[..len], &[2, 0x1f, 0xff, 0x7f, 0x81, 0]);
    }

    #[test]
    fn consumer_usage_is_little_endian() {
        let report = ConsumerReport { usage: 0x00e9 };
        let mut buf = [0u8; MAX_REPORT_FRAME];
        let len = frame(&ALL_REPORTS, &report, &mut buf).unwrap();
        assert_eq!(&buf[..len], &[3, 0xe9, 0x00]);
    }

    #[test]
    fn gamepad_report_follows_descriptor_order() {
        let report = GamepadReport {
            x: 1,
            y: 2,
            z: 3,
            rz: 4,
            rx: 5,
            ry: -6,
            hat: Hat::Left,
            buttons: 0x8000_0001,
        };
        let mut buf = [0u8; MAX_REPORT_FRAME];
        let len = frame(&ALL_REPORTS, &report, &mut buf).unwrap();
        assert_eq!(len, MAX_REPORT_FRAME);
        assert_eq!(
            &buf[..len],
            &[4, 1, 2, 3, 4, 5, 0xfa, 7, 0x01, 0x00, 0x00, 0x80]
        );
    }

    #[test]
    fn disabled_report_is_rejected() {
        let reports = HidReports {
            keyboard: false,
            ..ALL_REPORTS
        };
        let mut buf = [0u8; MAX_REPORT_FRAME];
        assert!(matches!(
            frame(&reports, &KeyboardReport::default(), &mut buf),
            Err(Error::ReportDisabled {
                kind: ReportKind::Keyboard
            })
        ));
        // IDs shift down once the keyboard is gone
        assert_eq!(frame(&reports, &MouseReport::default(), &mut buf).unwrap(), 6);
        assert_eq!(buf[0], 1);
    }

    #[test]
    fn short_buffer_is_rejected() {
        let mut buf = [0u8; 4];
        assert!(matches!(
            frame(&ALL_REPORTS, &KeyboardReport::default(), &mut buf),
            Err(Error::BufferTooSmall { needed: 9 })
        ));
    }
}
