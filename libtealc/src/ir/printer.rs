//! The `printer` module writes the TealTac IR as its textual listing.

use std::io::{self, Write};

use super::{TtInstruction, TtProgram, TtSubroutine};

/// Prints the TealTac IR listing to stdout.
pub fn print(program: &TtProgram) {
    let stdout = io::stdout();
    _ = write_program(program, &mut stdout.lock());
}

/// Writes the TealTac IR listing into the given buffer.
///
/// You probably want `print` instead of this function, unless you deliberately want the listing in a buffer.
pub fn write_program(program: &TtProgram, buffer: &mut impl Write) -> io::Result<()> {
    for subroutine in &program.0 {
        write_subroutine(subroutine, buffer)?;
    }

    Ok(())
}

fn write_subroutine(subroutine: &TtSubroutine, buffer: &mut impl Write) -> io::Result<()> {
    writeln!(buffer, "subroutine {}", subroutine.name)?;

    for param in &subroutine.params {
        if param.is_array {
            writeln!(buffer, "  param {} : {} array", param.name, param.type_name)?;
        } else {
            writeln!(buffer, "  param {} : {}", param.name, param.type_name)?;
        }
    }

    for var in &subroutine.vars {
        writeln!(buffer, "  var {} : {} {}", var.name, var.type_name, var.size)?;
    }

    writeln!(buffer, "  instructions:")?;

    for instruction in &subroutine.instructions {
        match instruction {
            // Labels have no indentation.
            TtInstruction::Label { .. } => writeln!(buffer, "{instruction}")?,
            _ => writeln!(buffer, "    {instruction}")?,
        }
    }

    writeln!(buffer, "endsubroutine")?;
    writeln!(buffer)
}
