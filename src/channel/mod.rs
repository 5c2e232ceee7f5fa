//! Method channel bridging the host shell and its embedded UI layer.
//!
//! Requests name a method; the channel maps that name onto a closed set of
//! [`Method`]s and runs it against the session manager. Replies keep the
//! shapes UI callers already expect:
//!
//! - success: `{"success": true}`
//! - failure: `{"errorCode": "KIOSK_ERROR", "message": ..., "details": {"kind": ...}}`
//! - unknown method or channel: `{"notImplemented": true}`
//!
//! [`serve`] runs the channel over a line-delimited JSON stream.

mod handler;
mod method;
mod serve;
mod wire;

pub use handler::{ChannelError, KioskChannel};
pub use method::Method;
pub use serve::{ServeStats, serve};
pub use wire::{BAD_REQUEST, KIOSK_ERROR, MethodCall, Reply, Response};
