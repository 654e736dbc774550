use crate::opcode::Opcode;
use crate::operations::{self, Operation};

/// Selects the operation for an instruction word.
///
/// Dispatch goes by the high nibble first, then by whichever low nibbles the
/// class needs. Patterns that match no row are not an error; they decode to
/// an explicit no-op that still advances the program counter.
pub fn decode(op: &dyn Opcode) -> Operation {
    match op.nibbles() {
        (0x0, 0x0, 0xE, 0x0) => operations::clear,
        (0x0, 0x0, 0xE, 0xE) => operations::ret,
        (0x1, ..) => operations::jump,
        (0x2, ..) => operations::call,
        (0x3, ..) => operations::skip_eq,
        (0x4, ..) => operations::skip_ne,
        (0x5, .., 0x0) => operations::skip_eq_reg,
        (0x6, ..) => operations::set,
        (0x7, ..) => operations::add,
        (0x8, .., 0x0) => operations::copy,
        (0x8, .., 0x1) => operations::or,
        (0x8, .., 0x2) => operations::and,
        (0x8, .., 0x3) => operations::xor,
        (0x8, .., 0x4) => operations::add_carry,
        (0x8, .., 0x5) => operations::sub_borrow,
        (0x8, .., 0x6) => operations::shift_right,
        (0x8, .., 0x7) => operations::sub_rev,
        (0x8, .., 0xE) => operations::shift_left,
        (0x9, .., 0x0) => operations::skip_ne_reg,
        (0xA, ..) => operations::set_i,
        (0xB, ..) => operations::jump_v0,
        (0xC, ..) => operations::random,
        (0xD, ..) => operations::draw,
        (0xE, .., 0x9, 0xE) => operations::skip_key,
        (0xE, .., 0xA, 0x1) => operations::skip_no_key,
        (0xF, .., 0x0, 0x7) => operations::read_delay,
        (0xF, .., 0x0, 0xA) => operations::wait_key,
        (0xF, .., 0x1, 0x5) => operations::set_delay,
        (0xF, .., 0x1, 0x8) => operations::set_sound,
        (0xF, .., 0x1, 0xE) => operations::add_i,
        (0xF, .., 0x2, 0x9) => operations::font_addr,
        (0xF, .., 0x3, 0x3) => operations::bcd,
        (0xF, .., 0x5, 0x5) => operations::store_regs,
        (0xF, .., 0x6, 0x5) => operations::load_regs,
        _ => operations::nop,
    }
}
