pub const PRODUCT_NAME: &str = "Kalends";
/// PRODID emitted when the caller does not supply one.
pub const DEFAULT_PRODID: &str = const_str::concat!("-//", PRODUCT_NAME, "/EN");

/// The only iCalendar version this workspace reads or writes.
pub const ICALENDAR_VERSION: &str = "2.0";

/// Namespace prepended to IANA zone names when a TZID is emitted in prefixed form.
pub const TZID_PREFIX_HOST: &str = "freeassociation.sourceforge.net";
pub const DEFAULT_TZID_PREFIX: &str = const_str::concat!("/", TZID_PREFIX_HOST, "/");

/// Year used to derive timezone observances when nothing in the calendar pins one.
pub const DEFAULT_REFERENCE_YEAR: i32 = 2020;

/// Name of the optional configuration file.
pub const CONFIG_FILE_NAME: &str = "kalends.toml";
