use heapless::Vec;

use crate::{config::DEVICE_INFO, Error};

use super::{DESC_STRING, LANG_ID_EN_US};

/// Longest string, in UTF-16 code units, a descriptor can carry.
pub const MAX_STRING_CHARS: usize = 31;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StringIndex {
    LanguageIds = 0,
    Manufacturer,
    Product,
    SerialNumber,
    CdcInterface,
    MscInterface,
    HidInterface,
}

/// String descriptor table; index 0 is the supported language list and
/// index `i > 0` is `strings[i - 1]`.
#[derive(Debug, Clone)]
pub struct StringTable<const N: usize> {
    lang_id: u16,
    strings: [&'static str; N],
}

pub static STRINGS: StringTable<6> = StringTable::new(
    LANG_ID_EN_US,
    [
        DEVICE_INFO.manufacturer,
        DEVICE_INFO.product_name,
        DEVICE_INFO.serial_number,
        DEVICE_INFO.cdc_interface,
        DEVICE_INFO.msc_interface,
        DEVICE_INFO.hid_interface,
    ],
);

impl<const N: usize> StringTable<N> {
    pub const fn new(lang_id: u16, strings: [&'static str; N]) -> Self {
        StringTable { lang_id, strings }
    }

    /// Number of indexes, including the language list.
    pub const fn len(&self) -> usize {
        N + 1
    }

    pub const fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, index: u8) -> Option<&'static str> {
        match index {
            0 => None,
            _ => self.strings.get(index as usize - 1).copied(),
        }
    }
}

/// Staging area for the UTF-16 string descriptor handed to the USB stack.
///
/// Element 0 is the header: length in bytes in the low byte and the string
/// descriptor type in the high byte. The buffer holds only the most recently
/// loaded string.
#[derive(Debug, Default)]
pub struct StringDescriptorBuffer {
    units: Vec<u16, { MAX_STRING_CHARS + 1 }>,
}

impl StringDescriptorBuffer {
    pub const fn new() -> Self {
        StringDescriptorBuffer { units: Vec::new() }
    }

    /// Loads string `index` of `table`. The language ID is accepted for the
    /// stack's callback contract; every string is served in the table's language.
    pub fn load<const N: usize>(
        &mut self,
        table: &StringTable<N>,
        index: u8,
        _lang_id: u16,
    ) -> Result<&[u16], Error> {
        // 0xEE (Microsoft OS descriptor) is rejected here as well.
        let string = match index {
            0 => None,
            _ => match table.get(index) {
                Some(string) => Some(string),
                None => {
                    warn!("string descriptor {} out of range", index);
                    return Err(Error::UnknownStringIndex { index });
                }
            },
        };

        self.units.clear();
        // header placeholder, patched once the length is known
        self.push(0);
        match string {
            None => self.push(table.lang_id),
            Some(string) => {
                let mut units = [0u16; 2];
                for c in string.chars() {
                    let encoded = c.encode_utf16(&mut units);
                    if self.units.len() + encoded.len() > self.units.capacity() {
                        break;
                    }
                    encoded.iter().for_each(|unit| self.push(*unit));
                }
            }
        }
        let chars = self.units.len() - 1;
        self.units[0] = ((DESC_STRING as u16) << 8) | (2 * chars + 2) as u16;
        debug!("string descriptor {} loaded, {} chars", index, chars);
        Ok(&self.units)
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.units
    }

    fn push(&mut self, unit: u16) {
        let pushed = self.units.push(unit);
        debug_assert!(pushed.is_ok(), "string descriptor buffer overflow");
    }
}
