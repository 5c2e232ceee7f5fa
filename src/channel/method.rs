//! The closed set of operations the channel exposes.

use super::handler::ChannelError;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Enter lockdown (`startKiosk`).
    StartKiosk,
    /// Exit lockdown (`stopKiosk`).
    StopKiosk,
}

impl Method {
    pub const ALL: [Method; 2] = [Method::StartKiosk, Method::StopKiosk];

    /// Wire name of this method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::StartKiosk => "startKiosk",
            Method::StopKiosk => "stopKiosk",
        }
    }
}

impl FromStr for Method {
    type Err = ChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| ChannelError::UnrecognizedOperation(s.to_string()))
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
