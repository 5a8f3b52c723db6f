use std::collections::BTreeSet;

use crate::errors::EmpError;
use crate::io::CircuitSource;

/// The engine reveals every output to every party, so each party must list
/// exactly the outputs the circuit declares.
pub fn check_settings(source: &CircuitSource) -> Result<(), EmpError> {
    let declared: BTreeSet<&str> = source.info.outputs.iter().map(|d| d.name.as_str()).collect();
    for (i, setting) in source.mpc_settings.iter().enumerate() {
        let listed: BTreeSet<&str> = setting.outputs.iter().map(String::as_str).collect();
        if listed != declared {
            let party = setting
                .name
                .clone()
                .unwrap_or_else(|| format!("party{}", i));
            tracing::debug!(%party, ?listed, ?declared, "party outputs differ from circuit outputs");
            return Err(EmpError::OutputsMismatch { party });
        }
    }
    Ok(())
}
