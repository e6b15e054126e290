// The defmt macros expect `defmt` to be in scope, so re-export it for the wrappers below.
#[cfg(feature = "defmt")]
pub(crate) use defmt;

#[cfg(feature = "defmt")]
macro_rules! trace {
    ($($arg:tt)*) => {{
        use $crate::log::defmt;
        defmt::trace!($($arg)*);
    }};
}

#[cfg(feature = "defmt")]
macro_rules! debug {
    ($($arg:tt)*) => {{
        use $crate::log::defmt;
        defmt::debug!($($arg)*);
    }};
}

#[cfg(feature = "defmt")]
macro_rules! warn {
    ($($arg:tt)*) => {{
        use $crate::log::defmt;
        defmt::warn!($($arg)*);
    }};
}

#[cfg(not(feature = "defmt"))]
macro_rules! trace {
    ($($arg:tt)*) => {{
        let _ = ($($arg)*);
    }};
}

#[cfg(not(feature = "defmt"))]
macro_rules! debug {
    ($($arg:tt)*) => {{
        let _ = ($($arg)*);
    }};
}

#[cfg(not(feature = "defmt"))]
macro_rules! warn {
    ($($arg:tt)*) => {{
        let _ = ($($arg)*);
    }};
}
