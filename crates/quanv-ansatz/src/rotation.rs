//! Rotation-gate kinds for ansatz layers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use quanv_ir::{Circuit, CircuitResult, ParameterExpression, QubitId};

use crate::error::AnsatzError;

/// The single-qubit rotation kinds an ansatz layer can be built from.
///
/// Each kind contributes one parameterized rotation per qubit per
/// layer. Parsing an unrecognized name is an error, so a typo in a
/// configuration cannot silently drop a whole rotation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationGate {
    /// Rotation around the X axis.
    Rx,
    /// Rotation around the Y axis.
    Ry,
    /// Rotation around the Z axis.
    Rz,
}

impl RotationGate {
    /// The lowercase wire name of this rotation.
    pub fn name(self) -> &'static str {
        match self {
            RotationGate::Rx => "rx",
            RotationGate::Ry => "ry",
            RotationGate::Rz => "rz",
        }
    }

    /// Append this rotation to `circuit` on `qubit` with angle `theta`.
    pub fn apply(
        self,
        circuit: &mut Circuit,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> CircuitResult<()> {
        match self {
            RotationGate::Rx => circuit.rx(theta, qubit)?,
            RotationGate::Ry => circuit.ry(theta, qubit)?,
            RotationGate::Rz => circuit.rz(theta, qubit)?,
        };
        Ok(())
    }
}

impl fmt::Display for RotationGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RotationGate {
    type Err = AnsatzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rx" => Ok(RotationGate::Rx),
            "ry" => Ok(RotationGate::Ry),
            "rz" => Ok(RotationGate::Rz),
            other => Err(AnsatzError::UnknownRotation(other.to_string())),
        }
    }
}
