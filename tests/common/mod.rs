//! Shared fixtures for integration tests.

#![allow(dead_code)]

use sseconv::converter::Converter;
use sseconv::traits::FixedClock;

/// Clock reading used by [`fixed_converter`].
pub const FIXED_NOW: i64 = 1_700_000_000_000;

/// A converter whose clock never moves.
pub fn fixed_converter() -> Converter {
    Converter::new().with_clock(FixedClock(FIXED_NOW))
}

/// Captured production stream: a timestamped `opened` event, events without
/// timestamps, and a bare `ping`.
pub const REAL_STREAM: &str = r#"event:opened
data:{"querySentenceId":"2fda5ef7-cf01-42be-987f-da8105451041","timestamp":"1754018498163","turnId":"c2470163-dc3a-4316-864d-4753e69677f1","eventIndex":0,"sseId":"6a4ceace-dba1-4c8b-a21e-f090fdf39a19"}

event:onlineSearch
data:{"eventIndex":1,"content":{"details":[{"stage":"search","title":"Searching","content":"","toolName":null}]}}

event:webSearch
data:{"sub_type":"webSearch","eventIndex":4,"type":"ClientEvent","content":"Collecting sources"}

event:ping

event:refHostName
data:{"sseId":"6a4ceace-dba1-4c8b-a21e-f090fdf39a19","eventIndex":6,"content":{"refHostName":[{"index":"1","hostName":"example.com"}]}}

"#;

/// Three events, each with its own embedded timestamp.
pub const TIMESTAMPED_STREAM: &str = concat!(
    "event:message\n",
    "data:{\"sseId\":\"1\",\"timestamp\":\"1753968218000\"}\n",
    "\n",
    "event:message\n",
    "data:{\"sseId\":\"2\",\"timestamp\":\"1753968218500\"}\n",
    "\n",
    "event:close\n",
    "data:{\"sseId\":\"3\",\"timestamp\":1753968219000}\n",
    "\n",
);
