#![cfg_attr(not(test), no_std)]

#[macro_use]
mod log;

pub mod config;
pub mod descriptor;
mod error;
pub mod report;
#[cfg(feature = "tinyusb")]
pub mod tinyusb;
#[cfg(feature = "usb-device")]
pub mod usb;

pub use config::{DeviceInfo, DEVICE_INFO};
pub use error::Error;
