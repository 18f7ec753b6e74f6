//! Output catalogs for the three oncoanalyser result sets.
//!
//! Each result set is a closed enum. A [`Catalog`] pairs every variant with
//! its path template, in a fixed order. Version-specific templates are data
//! attached to the variant and applied by [`Catalog::select`], which returns
//! a new catalog; nothing is ever modified in place.

use std::fmt;

use crate::version::WorkflowVersion;

/// First workflow version that writes SAGE output under `sage_calling/`.
pub const SAGE_CALLING_SINCE: WorkflowVersion = WorkflowVersion::new(2, 2, 0);

/// Template used by workflow versions strictly below `before`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyTemplate {
    pub before: WorkflowVersion,
    pub template: &'static str,
}

pub trait OutputKind: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Top-level key of this result set in events, e.g. `tumorDnaInputs`.
    const GROUP: &'static str;

    /// Every variant, in catalog order.
    const ALL: &'static [Self];

    /// Wire name, e.g. `bamRedux`.
    fn key(self) -> &'static str;

    /// Template for current workflow versions.
    fn template(self) -> &'static str;

    fn legacy(self) -> Option<LegacyTemplate> {
        None
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.key() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TumorDnaOutput {
    BamRedux,
    ReduxJitterTsv,
    ReduxMsTsv,
    BamtoolsDir,
    SageDir,
    LinxAnnoDir,
    LinxPlotDir,
    PurpleDir,
    VirusinterpreterDir,
    ChordDir,
    SigsDir,
}

impl OutputKind for TumorDnaOutput {
    const GROUP: &'static str = "tumorDnaInputs";

    const ALL: &'static [Self] = &[
        Self::BamRedux,
        Self::ReduxJitterTsv,
        Self::ReduxMsTsv,
        Self::BamtoolsDir,
        Self::SageDir,
        Self::LinxAnnoDir,
        Self::LinxPlotDir,
        Self::PurpleDir,
        Self::VirusinterpreterDir,
        Self::ChordDir,
        Self::SigsDir,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::BamRedux => "bamRedux",
            Self::ReduxJitterTsv => "reduxJitterTsv",
            Self::ReduxMsTsv => "reduxMsTsv",
            Self::BamtoolsDir => "bamtoolsDir",
            Self::SageDir => "sageDir",
            Self::LinxAnnoDir => "linxAnnoDir",
            Self::LinxPlotDir => "linxPlotDir",
            Self::PurpleDir => "purpleDir",
            Self::VirusinterpreterDir => "virusinterpreterDir",
            Self::ChordDir => "chordDir",
            Self::SigsDir => "sigsDir",
        }
    }

    fn template(self) -> &'static str {
        match self {
            Self::BamRedux => "{DNA_MIDFIX}/alignments/dna/{TUMOR_DNA_LIBRARY_ID}.redux.bam",
            Self::ReduxJitterTsv => {
                "{DNA_MIDFIX}/alignments/dna/{TUMOR_DNA_LIBRARY_ID}.jitter_params.tsv"
            }
            Self::ReduxMsTsv => "{DNA_MIDFIX}/alignments/dna/{TUMOR_DNA_LIBRARY_ID}.ms_table.tsv.gz",
            Self::BamtoolsDir => {
                "{DNA_MIDFIX}/bamtools/{TUMOR_DNA_LIBRARY_ID}__{NORMAL_DNA_LIBRARY_ID}_{TUMOR_DNA_LIBRARY_ID}_bamtools/"
            }
            Self::SageDir => "{DNA_MIDFIX}/sage_calling/somatic/",
            Self::LinxAnnoDir => "{DNA_MIDFIX}/linx/somatic_annotations/",
            Self::LinxPlotDir => "{DNA_MIDFIX}/linx/somatic_plots/",
            Self::PurpleDir => "{DNA_MIDFIX}/purple/",
            Self::VirusinterpreterDir => "{DNA_MIDFIX}/virusinterpreter/",
            Self::ChordDir => "{DNA_MIDFIX}/chord/",
            Self::SigsDir => "{DNA_MIDFIX}/sigs/",
        }
    }

    fn legacy(self) -> Option<LegacyTemplate> {
        match self {
            Self::SageDir => Some(LegacyTemplate {
                before: SAGE_CALLING_SINCE,
                template: "{DNA_MIDFIX}/sage/somatic/",
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormalDnaOutput {
    BamRedux,
    ReduxJitterTsv,
    ReduxMsTsv,
    BamtoolsDir,
    SageDir,
    LinxAnnoDir,
}

impl OutputKind for NormalDnaOutput {
    const GROUP: &'static str = "normalDnaInputs";

    const ALL: &'static [Self] = &[
        Self::BamRedux,
        Self::ReduxJitterTsv,
        Self::ReduxMsTsv,
        Self::BamtoolsDir,
        Self::SageDir,
        Self::LinxAnnoDir,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::BamRedux => "bamRedux",
            Self::ReduxJitterTsv => "reduxJitterTsv",
            Self::ReduxMsTsv => "reduxMsTsv",
            Self::BamtoolsDir => "bamtoolsDir",
            Self::SageDir => "sageDir",
            Self::LinxAnnoDir => "linxAnnoDir",
        }
    }

    fn template(self) -> &'static str {
        match self {
            Self::BamRedux => "{DNA_MIDFIX}/alignments/dna/{NORMAL_DNA_LIBRARY_ID}.redux.bam",
            Self::ReduxJitterTsv => {
                "{DNA_MIDFIX}/alignments/dna/{NORMAL_DNA_LIBRARY_ID}.jitter_params.tsv"
            }
            Self::ReduxMsTsv => {
                "{DNA_MIDFIX}/alignments/dna/{NORMAL_DNA_LIBRARY_ID}.ms_table.tsv.gz"
            }
            Self::BamtoolsDir => {
                "{DNA_MIDFIX}/bamtools/{TUMOR_DNA_LIBRARY_ID}__{NORMAL_DNA_LIBRARY_ID}_{NORMAL_DNA_LIBRARY_ID}_bamtools/"
            }
            Self::SageDir => "{DNA_MIDFIX}/sage_calling/germline/",
            Self::LinxAnnoDir => "{DNA_MIDFIX}/linx/germline_annotations/",
        }
    }

    fn legacy(self) -> Option<LegacyTemplate> {
        match self {
            Self::SageDir => Some(LegacyTemplate {
                before: SAGE_CALLING_SINCE,
                template: "{DNA_MIDFIX}/sage/germline/",
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TumorRnaOutput {
    Bam,
    IsofoxDir,
}

impl OutputKind for TumorRnaOutput {
    const GROUP: &'static str = "tumorRnaInputs";

    const ALL: &'static [Self] = &[Self::Bam, Self::IsofoxDir];

    fn key(self) -> &'static str {
        match self {
            Self::Bam => "bam",
            Self::IsofoxDir => "isofoxDir",
        }
    }

    fn template(self) -> &'static str {
        match self {
            Self::Bam => "{RNA_MIDFIX}/alignments/rna/{TUMOR_RNA_LIBRARY_ID}.md.bam",
            Self::IsofoxDir => "{RNA_MIDFIX}/isofox/",
        }
    }
}

/// Ordered (kind, template) pairs covering every variant of `K` exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog<K> {
    entries: Vec<(K, &'static str)>,
}

impl<K: OutputKind> Catalog<K> {
    /// The current-version catalog.
    pub fn base() -> Self {
        Self {
            entries: K::ALL.iter().map(|&kind| (kind, kind.template())).collect(),
        }
    }

    /// Catalog as written by a producer at `version`.
    pub fn for_version(version: &WorkflowVersion) -> Self {
        Self::base().select(version)
    }

    /// A copy of this catalog with legacy templates swapped in wherever
    /// `version` predates them.
    pub fn select(&self, version: &WorkflowVersion) -> Self {
        let entries = self
            .entries
            .iter()
            .map(|&(kind, template)| match kind.legacy() {
                Some(legacy) if *version < legacy.before => (kind, legacy.template),
                _ => (kind, template),
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[(K, &'static str)] {
        &self.entries
    }

    pub fn template(&self, kind: K) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|&(_, template)| template)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
