pub mod encoded_bytes;
pub mod frames;

pub use frames::{decode_frames, encode_frames, Frame};
