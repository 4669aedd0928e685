//! Blinky on a Nexys-style Artix-7 board — simple boardio example.
//!
//! Describes a cut-down development board (clock, LEDs, a button, a UART
//! and a Pmod header that aliases another connector) and drives the full
//! engine workflow: register, request, add a platform command, finalize.

use boardio_engine::ConstraintEngine;
use boardio_model::{ConnectorDecl, Drive, IoStandard, Misc, Pins, PlatformInfo, Resource, Subsignal};

/// The board's resource descriptors.
///
/// Two `led` instances share a name and differ by number; `serial` is a
/// composite with a shared I/O standard; `pmod_io` reaches its pins through
/// the JA header, which itself aliases the breakout connector.
pub fn io() -> Vec<Resource> {
    vec![
        Resource::new(
            "clk100",
            None,
            vec![
                Pins::new("E3").into(),
                IoStandard::new("LVCMOS33").into(),
                PlatformInfo::new(serde_json::json!({"clock": true})).into(),
            ],
        ),
        Resource::new(
            "led",
            Some(0),
            vec![Pins::new("H17").into(), IoStandard::new("LVCMOS33").into()],
        ),
        Resource::new(
            "led",
            Some(1),
            vec![Pins::new("K15").into(), IoStandard::new("LVCMOS33").into()],
        ),
        Resource::new(
            "btn",
            Some(0),
            vec![
                Pins::new("J15").into(),
                IoStandard::new("LVCMOS33").into(),
                Misc::new("PULLDOWN=TRUE").into(),
            ],
        ),
        Resource::new(
            "serial",
            Some(0),
            vec![
                IoStandard::new("LVCMOS33").into(),
                Subsignal::new("tx", vec![Pins::new("D10").into(), Drive::new("8").into()]).into(),
                Subsignal::new("rx", vec![Pins::new("A9").into()]).into(),
            ],
        ),
        Resource::new(
            "pmod_io",
            None,
            vec![
                Pins::new("JA:0 JA:1 JA:2 JA:3").into(),
                IoStandard::new("LVCMOS33").into(),
            ],
        ),
    ]
}

/// The board's connectors. `JA` aliases the breakout header `BRK`, so
/// `JA:n` resolves through two hops.
pub fn connectors() -> Vec<ConnectorDecl> {
    vec![
        ConnectorDecl::ordered("BRK", &["C17 D18 E18 G17 None D17 E17 F18"]),
        ConnectorDecl::ordered("JA", &["BRK:0 BRK:1 BRK:2 BRK:3"]),
    ]
}

/// An engine loaded with this board's description.
pub fn engine() -> ConstraintEngine {
    ConstraintEngine::new(io(), connectors()).expect("board description is well-formed")
}
