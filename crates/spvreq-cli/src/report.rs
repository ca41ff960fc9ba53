//! Rendering of declarations and environments for the command line.

use serde::Serialize;
use spvreq_core::{Addressing, Capability, Declarations, EnvironmentKind, EnvironmentResolver};
use std::fmt::Write;

/// One declaration set, with extensions shown by their `SPV_*` names.
#[derive(Debug, Serialize)]
pub struct DeclarationReport {
    pub capabilities: Vec<Capability>,
    pub extensions: Vec<&'static str>,
}

impl From<&Declarations> for DeclarationReport {
    fn from(decls: &Declarations) -> Self {
        Self {
            capabilities: decls.capabilities().to_vec(),
            extensions: decls.extensions().iter().map(|e| e.name()).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UnitReport {
    pub unit: String,
    #[serde(flatten)]
    pub declarations: DeclarationReport,
}

/// Output of `spvreq resolve`.
#[derive(Debug, Serialize)]
pub struct ResolveReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<Vec<UnitReport>>,
    #[serde(flatten)]
    pub module: DeclarationReport,
}

impl ResolveReport {
    /// `units` pairs each unit name with its own declarations; it is kept
    /// only when `per_unit` is set.
    pub fn new(module: &Declarations, units: Vec<(String, Declarations)>, per_unit: bool) -> Self {
        let units = per_unit.then(|| {
            units
                .iter()
                .map(|(unit, decls)| UnitReport {
                    unit: unit.clone(),
                    declarations: decls.into(),
                })
                .collect()
        });
        Self {
            units,
            module: module.into(),
        }
    }

    pub fn to_pretty(&self) -> String {
        let mut out = String::new();
        if let Some(units) = &self.units {
            for unit in units {
                let _ = writeln!(out, "; unit {}", unit.unit);
                write_declarations(&mut out, &unit.declarations);
            }
            out.push_str("; module\n");
        }
        write_declarations(&mut out, &self.module);
        out
    }
}

fn write_declarations(out: &mut String, decls: &DeclarationReport) {
    for cap in &decls.capabilities {
        let _ = writeln!(out, "OpCapability {}", cap);
    }
    for ext in &decls.extensions {
        let _ = writeln!(out, "OpExtension \"{}\"", ext);
    }
}

/// Output of `spvreq env`.
#[derive(Debug, Serialize)]
pub struct EnvReport {
    pub triple: String,
    pub environment: EnvironmentKind,
    pub addressing: Addressing,
    pub spirv_version: String,
    pub opencl_version: String,
    pub vulkan_version: String,
    pub capabilities: Vec<Capability>,
    pub extensions: Vec<&'static str>,
    pub ext_inst_sets: Vec<&'static str>,
}

impl From<&EnvironmentResolver> for EnvReport {
    fn from(env: &EnvironmentResolver) -> Self {
        let profile = env.profile();
        Self {
            triple: profile.triple().to_string(),
            environment: profile.kind(),
            addressing: profile.addressing(),
            spirv_version: profile.spirv_version().to_string(),
            opencl_version: profile.opencl_version().to_string(),
            vulkan_version: profile.vulkan_version().to_string(),
            capabilities: env.available().collect(),
            extensions: env.extensions().map(|e| e.name()).collect(),
            ext_inst_sets: env.ext_inst_sets().map(|s| s.name()).collect(),
        }
    }
}

impl EnvReport {
    pub fn to_pretty(&self) -> String {
        let names = |items: Vec<String>| {
            if items.is_empty() {
                "(none)".to_string()
            } else {
                items.join(" ")
            }
        };
        let mut out = String::new();
        let _ = writeln!(out, "triple:        {}", self.triple);
        let _ = writeln!(out, "environment:   {}", self.environment);
        let _ = writeln!(out, "addressing:    {:?}", self.addressing);
        let _ = writeln!(out, "SPIR-V:        {}", self.spirv_version);
        let _ = writeln!(out, "OpenCL:        {}", self.opencl_version);
        let _ = writeln!(out, "Vulkan:        {}", self.vulkan_version);
        let _ = writeln!(
            out,
            "capabilities:  {}",
            names(self.capabilities.iter().map(|c| c.to_string()).collect())
        );
        let _ = writeln!(
            out,
            "extensions:    {}",
            names(self.extensions.iter().map(|e| e.to_string()).collect())
        );
        let _ = writeln!(
            out,
            "ext-inst sets: {}",
            names(self.ext_inst_sets.iter().map(|s| s.to_string()).collect())
        );
        out
    }
}
