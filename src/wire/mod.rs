//! Little-endian wire primitives shared by every packet layout.
//!
//! The decoder is built from four pieces:
//!
//! - [`Cursor`]: a single forward-only offset into one datagram.
//! - [`ScalarKind`] / [`Value`]: the fixed set of primitive wire types and a
//!   runtime value tree for them.
//! - [`Decode`]: compile-time resolved decoding for scalars, fixed arrays and
//!   records declared with `wire_record!`.
//! - [`Layout`]: a static description of the same shapes that can be walked at
//!   runtime to produce a [`Value`] tree without knowing the concrete type.
//!
//! Both decoding paths consume exactly the same bytes; tests hold them to
//! producing identical value trees.

mod cursor;
mod decode;
mod layout;
mod scalar;

pub use cursor::Cursor;
pub use decode::Decode;
pub(crate) use decode::wire_record;
pub use layout::Layout;
pub use scalar::{ScalarKind, Value, decode_scalar};
