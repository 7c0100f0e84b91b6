//! Domain logic shared by the database and API crates.
//!
//! Pure code only: shared type aliases, the domain error taxonomy, patient
//! business-code handling, detection-result validation, QR card
//! encoding/decoding, storage path layout, and field validation. All I/O
//! (database, filesystem, HTTP) lives in the other crates.

pub mod detection;
pub mod error;
pub mod patient_code;
pub mod qr;
pub mod storage;
pub mod types;
pub mod validation;
