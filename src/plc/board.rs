//! The control matrix of the reference board.
//!
//! | Output | LED       | Rule    | Mask        | Lit when                 |
//! |--------|-----------|---------|-------------|--------------------------|
//! | 0      | PLC_LED_1 | AllBits | `0000_1001` | inputs 0 and 3           |
//! | 1      | PLC_LED_2 | AllBits | `0000_0001` | input 0                  |
//! | 2      | PLC_LED_3 | AllBits | `0000_1100` | inputs 2 and 3           |
//! | 3      | PLC_LED_4 | AnyBit  | `0000_1111` | any input                |
//!
//! Both descriptor arrays are checked at compile time; a bad edit here
//! fails the build instead of the boot.

use crate::pins;

use super::table::{
    InputChannel, InputTable, OutputChannel, OutputTable, RuleMode, check_inputs, check_outputs,
};

pub const BOARD_INPUTS: [InputChannel; 4] = [
    InputChannel::new(0, pins::BTN_1_GPIO),
    InputChannel::new(1, pins::BTN_2_GPIO),
    InputChannel::new(2, pins::BTN_3_GPIO),
    InputChannel::new(3, pins::BTN_4_GPIO),
];

pub const BOARD_OUTPUTS: [OutputChannel; 4] = [
    OutputChannel::new(0, pins::PLC_LED_1_GPIO, RuleMode::AllBits, 0b0000_1001),
    OutputChannel::new(1, pins::PLC_LED_2_GPIO, RuleMode::AllBits, 0b0000_0001),
    OutputChannel::new(2, pins::PLC_LED_3_GPIO, RuleMode::AllBits, 0b0000_1100),
    OutputChannel::new(3, pins::PLC_LED_4_GPIO, RuleMode::AnyBit, 0b0000_1111),
];

const _: () = assert!(check_inputs(&BOARD_INPUTS).is_ok(), "invalid board input table");
const _: () = assert!(
    check_outputs(&BOARD_OUTPUTS, &BOARD_INPUTS).is_ok(),
    "invalid board output table"
);

/// Build the board input table.
pub fn init_inputs() -> InputTable {
    InputTable::try_new(&BOARD_INPUTS).expect("board inputs are checked at compile time")
}

/// Build the board output table.
pub fn init_outputs() -> OutputTable {
    OutputTable::try_new(&BOARD_OUTPUTS, &init_inputs())
        .expect("board outputs are checked at compile time")
}
