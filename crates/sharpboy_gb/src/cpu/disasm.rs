//! Single-instruction disassembler driven by the dispatch table metadata.

use std::fmt;

use super::table::{lookup, lookup_extended, Opcode, OpcodeKind};
use crate::memory::Memory;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Disassembly {
    pub address: u16,
    pub bytes: Vec<u8>,
    pub text: String,
}

impl Disassembly {
    /// Address of the next instruction.
    pub fn next_address(&self) -> u16 {
        self.address.wrapping_add(self.bytes.len() as u16)
    }
}

impl fmt::Display for Disassembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex: Vec<String> = self.bytes.iter().map(|b| format!("{b:02X}")).collect();
        write!(f, "{:04X}  {:<9} {}", self.address, hex.join(" "), self.text)
    }
}

/// Decode the instruction at `address`. Reads go through `mem`, so this
/// should only be pointed at ROM or RAM, not at I/O with read side effects.
pub fn disassemble(mem: &mut dyn Memory, address: u16) -> Disassembly {
    let opcode = mem.read_byte(address);
    let entry = lookup(opcode);

    if entry.kind() == OpcodeKind::Prefix {
        let extended = mem.read_byte(address.wrapping_add(1));
        return Disassembly {
            address,
            bytes: vec![opcode, extended],
            text: lookup_extended(extended).mnemonic().to_string(),
        };
    }

    let bytes: Vec<u8> = (0..u16::from(entry.length()))
        .map(|i| mem.read_byte(address.wrapping_add(i)))
        .collect();
    let text = render(entry, address, &bytes);
    Disassembly {
        address,
        bytes,
        text,
    }
}

fn render(entry: &Opcode, address: u16, bytes: &[u8]) -> String {
    let mnemonic = entry.mnemonic();
    if entry.is_illegal() {
        return format!("DB ${:02X}", bytes[0]);
    }

    let imm8 = bytes.get(1).copied().unwrap_or(0);
    let imm16 = u16::from_le_bytes([imm8, bytes.get(2).copied().unwrap_or(0)]);

    if mnemonic.contains("d16") {
        mnemonic.replace("d16", &format!("${imm16:04X}"))
    } else if mnemonic.contains("a16") {
        mnemonic.replace("a16", &format!("${imm16:04X}"))
    } else if mnemonic.contains("d8") {
        mnemonic.replace("d8", &format!("${imm8:02X}"))
    } else if mnemonic.contains("a8") {
        mnemonic.replace("a8", &format!("$FF{imm8:02X}"))
    } else if mnemonic.starts_with("JR") {
        let target = address
            .wrapping_add(2)
            .wrapping_add(imm8 as i8 as u16);
        mnemonic.replace("r8", &format!("${target:04X}"))
    } else if mnemonic.contains("+r8") {
        mnemonic.replace("+r8", &format!("{:+}", imm8 as i8))
    } else if mnemonic.contains("r8") {
        mnemonic.replace("r8", &format!("{:+}", imm8 as i8))
    } else {
        mnemonic.to_string()
    }
}
