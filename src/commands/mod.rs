pub mod base64;
pub mod decrypt;
pub mod encrypt;
pub mod hash;
pub mod identify;
pub mod keys;

pub use self::base64::{base64_decode, base64_encode};
pub use decrypt::decrypt;
pub use encrypt::encrypt;
pub use hash::hash;
pub use identify::identify;
pub use keys::{default_key, gen_key, validate_key};
