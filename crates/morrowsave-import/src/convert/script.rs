//! Script locals and running global scripts.

use morrowsave_ess::{Scpt, ScriptLocals};
use morrowsave_omw::{GlobalScript, Locals, Variant};

/// Legacy locals carry values only; names are left for the engine to fill
/// in from the script's declarations.
pub fn convert_locals(scri: &ScriptLocals) -> Locals {
    let shorts = scri.shorts.iter().map(|&v| Variant::Short(v));
    let longs = scri.longs.iter().map(|&v| Variant::Long(v));
    let floats = scri.floats.iter().map(|&v| Variant::Float(v));
    Locals {
        variables: shorts.chain(longs).chain(floats).map(|v| (String::new(), v)).collect(),
    }
}

pub fn convert_scpt(scpt: &Scpt) -> GlobalScript {
    GlobalScript {
        id: scpt.name.to_lowercase(),
        locals: convert_locals(&scpt.locals),
        running: scpt.running,
    }
}
