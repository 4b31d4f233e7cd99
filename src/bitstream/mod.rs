//! The bitstream module forms the I/O subsystem for huffpack.
//!
//! A channel is opened in exactly one direction. BitWriter packs bits into bytes on the way
//! out, BitReader unpacks them on the way in. Both fill each byte starting at the least
//! significant bit: the first bit of a byte is bit 0, the eighth is bit 7. Integers are
//! written least significant bit first, so an 8 bit `put_int` of a byte reproduces that byte.
//!
//! Having the two directions as separate types means a channel can never be used in the
//! wrong mode, and since `close` consumes the channel, nothing can be written after it.
//!
pub mod bitreader;
pub mod bitwriter;
