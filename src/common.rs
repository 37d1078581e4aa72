pub mod clock;
pub mod dates;
pub mod error;
pub mod i18n;
