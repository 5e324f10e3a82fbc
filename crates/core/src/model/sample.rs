use serde::{Deserialize, Serialize};

/// One entry in a call stack: a code address plus the symbol the profiler
/// resolved for it, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub address: u64,
    pub symbol: Option<String>,
}

impl Frame {
    /// Display name for this frame. Unresolved frames get a stable
    /// hexadecimal label so they still merge across samples sharing the
    /// same address.
    pub fn resolved_name(&self) -> String {
        match &self.symbol {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("0x{:x}", self.address),
        }
    }
}

/// One weighted observation: a call stack plus a scalar value
/// (e.g. accumulated CPU time).
///
/// Frames are stored leaf-first, as pprof does: `frames[0]` is the
/// innermost frame and the last entry is the outermost caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample {
    pub frames: Vec<Frame>,
    pub value: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolved_name_prefers_symbol() {
        let frame = Frame {
            address: 0xdeadbeef,
            symbol: Some("main".to_string()),
        };
        assert_eq!(frame.resolved_name(), "main");
    }

    #[test]
    fn resolved_name_falls_back_to_address() {
        let frame = Frame {
            address: 0x4005d0,
            symbol: None,
        };
        assert_eq!(frame.resolved_name(), "0x4005d0");

        let empty = Frame {
            address: 0x4005d0,
            symbol: Some(String::new()),
        };
        assert_eq!(empty.resolved_name(), "0x4005d0");
    }
}
