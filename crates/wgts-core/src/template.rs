//! Output path templates.
//!
//! Templates use `{NAME}` placeholders drawn from a fixed vocabulary. Every
//! placeholder must be known and bound; anything else is rejected rather
//! than left in the rendered path.

use std::str::FromStr;

use crate::error::TemplateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    DnaMidfix,
    RnaMidfix,
    TumorDnaLibraryId,
    NormalDnaLibraryId,
    TumorRnaLibraryId,
}

impl Placeholder {
    pub fn name(self) -> &'static str {
        match self {
            Placeholder::DnaMidfix => "DNA_MIDFIX",
            Placeholder::RnaMidfix => "RNA_MIDFIX",
            Placeholder::TumorDnaLibraryId => "TUMOR_DNA_LIBRARY_ID",
            Placeholder::NormalDnaLibraryId => "NORMAL_DNA_LIBRARY_ID",
            Placeholder::TumorRnaLibraryId => "TUMOR_RNA_LIBRARY_ID",
        }
    }
}

impl FromStr for Placeholder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DNA_MIDFIX" => Ok(Placeholder::DnaMidfix),
            "RNA_MIDFIX" => Ok(Placeholder::RnaMidfix),
            "TUMOR_DNA_LIBRARY_ID" => Ok(Placeholder::TumorDnaLibraryId),
            "NORMAL_DNA_LIBRARY_ID" => Ok(Placeholder::NormalDnaLibraryId),
            "TUMOR_RNA_LIBRARY_ID" => Ok(Placeholder::TumorRnaLibraryId),
            _ => Err(()),
        }
    }
}

/// Values available for substitution. Unset fields leave their placeholders
/// unbound.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateValues<'a> {
    pub dna_midfix: Option<&'a str>,
    pub rna_midfix: Option<&'a str>,
    pub tumor_dna_library_id: Option<&'a str>,
    pub normal_dna_library_id: Option<&'a str>,
    pub tumor_rna_library_id: Option<&'a str>,
}

impl<'a> TemplateValues<'a> {
    /// Bindings for the DNA groups: relative path plus both DNA library ids.
    pub fn dna(relative_path: &'a str, tumor: &'a str, normal: &'a str) -> Self {
        Self {
            dna_midfix: Some(relative_path),
            tumor_dna_library_id: Some(tumor),
            normal_dna_library_id: Some(normal),
            ..Self::default()
        }
    }

    pub fn rna(relative_path: &'a str, tumor_rna: &'a str) -> Self {
        Self {
            rna_midfix: Some(relative_path),
            tumor_rna_library_id: Some(tumor_rna),
            ..Self::default()
        }
    }

    pub fn get(&self, placeholder: Placeholder) -> Option<&'a str> {
        match placeholder {
            Placeholder::DnaMidfix => self.dna_midfix,
            Placeholder::RnaMidfix => self.rna_midfix,
            Placeholder::TumorDnaLibraryId => self.tumor_dna_library_id,
            Placeholder::NormalDnaLibraryId => self.normal_dna_library_id,
            Placeholder::TumorRnaLibraryId => self.tumor_rna_library_id,
        }
    }
}

/// Substitute every placeholder in `template`.
pub fn render(template: &str, values: &TemplateValues<'_>) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len() + 32);
    let mut rest = template;

    while let Some(open) = rest.find(['{', '}']) {
        if rest.as_bytes()[open] == b'}' {
            return Err(TemplateError::Malformed(template.to_string()));
        }
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after
            .find('}')
            .ok_or_else(|| TemplateError::Malformed(template.to_string()))?;
        let name = &after[..close];
        if name.contains('{') {
            return Err(TemplateError::Malformed(template.to_string()));
        }

        let placeholder =
            Placeholder::from_str(name).map_err(|()| TemplateError::UnknownPlaceholder {
                name: name.to_string(),
                template: template.to_string(),
            })?;
        let value = values
            .get(placeholder)
            .ok_or_else(|| TemplateError::Unbound {
                name: name.to_string(),
                template: template.to_string(),
            })?;
        out.push_str(value);
        rest = &after[close + 1..];
    }
    out.push_str(rest);

    Ok(out)
}

/// Placeholders referenced by `template`, in order of appearance.
pub fn placeholders(template: &str) -> Result<Vec<Placeholder>, TemplateError> {
    let mut found = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let close = after
            .find('}')
            .ok_or_else(|| TemplateError::Malformed(template.to_string()))?;
        let name = &after[..close];
        let placeholder =
            Placeholder::from_str(name).map_err(|()| TemplateError::UnknownPlaceholder {
                name: name.to_string(),
                template: template.to_string(),
            })?;
        found.push(placeholder);
        rest = &after[close + 1..];
    }
    Ok(found)
}
