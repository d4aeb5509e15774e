//! Random identifiers.

use uuid::Uuid;

/// Generate a random (version 4) UUID as a 36-character lowercase,
/// hyphenated string, e.g. `"9b2f4c1e-3d8a-4f6b-a2c7-0e5d91b3f8a4"`.
///
/// Intended for client-side keys and correlation ids, not as a secret.
pub fn uuid() -> String {
    Uuid::new_v4().hyphenated().to_string()
}
