//! Content digests and base64 encoding.
//!
//! Hashing streams files through the [`Hasher`] trait, so arbitrarily large
//! inputs are digested in constant memory. Base64 encoding reads whole
//! inputs and is bounded by [`EncodeOptions`].
//!
//! ```
//! let digest = burrow_verify::sha256_text("hello world");
//! assert_eq!(
//!     digest,
//!     "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
//! );
//! ```

pub use self::encode::{EncodeOptions, decode_bytes, decode_text, encode_file, encode_text};
pub use self::error::{Error, Result};
pub use self::hash::{md5_file, md5_text, sha256_file, sha256_text, sha512_file, sha512_text};
pub use self::hasher::{Hasher, HashingReader, Md5Hasher, Sha256Hasher, Sha512Hasher};

pub mod encode;
mod error;
pub mod hash;
mod hasher;
