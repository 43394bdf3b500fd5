//! Top-level branches of the ontology

use super::text::normalize;
use crate::error::SoliError;
use crate::rdf::vocab;
use std::fmt;
use std::str::FromStr;

macro_rules! soli_types {
    ($($variant:ident => ($label:literal, $id:literal)),+ $(,)?) => {
        /// A top-level branch of the taxonomy, rooted at a fixed class
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum SoliType {
            $($variant),+
        }

        impl SoliType {
            /// Every branch
            pub const ALL: &'static [SoliType] = &[$(SoliType::$variant),+];

            /// Display label of the branch root
            pub fn label(self) -> &'static str {
                match self {
                    $(SoliType::$variant => $label),+
                }
            }

            /// Short identifier of the branch root
            pub fn id(self) -> &'static str {
                match self {
                    $(SoliType::$variant => $id),+
                }
            }
        }
    };
}

soli_types! {
    ActorPlayer => ("Actor / Player", "R8CdMpOM0RmyrgCCvbpiLS0"),
    AreaOfLaw => ("Area of Law", "RSYBzf149Mi5KE0YtmpUmr"),
    AssetType => ("Asset Type", "RCIwc6WJi6IT7xePURxsi4T"),
    CommunicationModality => ("Communication Modality", "R8qItBwG2pRMFhUq1HQEMnb"),
    Currency => ("Currency", "R767niCLQVC5zIcO5WDQMSl"),
    DataFormat => ("Data Format", "R79aItNTJQwHgR002wuX3iC"),
    DocumentArtifact => ("Document / Artifact", "RDt4vQCYDfY0R9fZ5FNnTbj"),
    EngagementTerms => ("Engagement Terms", "R9kmGZf5FSmFdouXWQ1Nndm"),
    Event => ("Event", "R73hoH1RXYjBTYiGfolpsAF"),
    ForumsVenues => ("Forums and Venues", "RBjHwNNG2ASVmasLFU42otk"),
    GovernmentalBody => ("Governmental Body", "RBQGborh1CfXanGZipDL0Qo"),
    Industry => ("Industry", "RDIwFaFcH4KY0gwEY0QlMTp"),
    Language => ("Language", "RDOvAHsvY8TKJ1O1orXPM9o"),
    OntologyType => ("SOLI Type", "R8uI6AZ9vSgpAdKmfGZKfTZ"),
    LegalAuthorities => ("Legal Authorities", "RC1CZydjfH8oiM4W3rCkma3"),
    LegalEntity => ("Legal Entity", "R7L5eLIzH0CpOUE74uJvSjL"),
    Location => ("Location", "R9aSzp9cEiBCzObnP92jYFX"),
    MatterNarrative => ("Matter Narrative", "R7ReDY2v13rer1U8AyOj55L"),
    MatterNarrativeFormat => ("Matter Narrative Format", "R8ONVC8pLVJC5dD4eKqCiZL"),
    Objectives => ("Objectives", "RlNFgB3TQfMzV26V4V7u4E"),
    Service => ("Service", "RDK1QEdQg1T8B5HQqMK2pZN"),
    StandardsCompatibility => ("Standards Compatibility", "RB4cFSLB4xvycDlKv73dOg6"),
    Status => ("Status", "Rx69EnEj3H3TpcgTfUSoYx"),
    SystemIdentifiers => ("System Identifiers", "R8EoZh39tWmXCkmP2Xzjl6E"),
}

impl SoliType {
    /// Canonical IRI of the branch root
    pub fn iri(self) -> String {
        format!("{}{}", vocab::SOLI_NS, self.id())
    }
}

impl fmt::Display for SoliType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SoliType {
    type Err = SoliError;

    /// Accepts the label in any case and punctuation (`Area of Law`,
    /// `area-of-law`, `AREA_OF_LAW`) or the variant name (`AreaOfLaw`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        let squashed = wanted.replace(' ', "");
        SoliType::ALL
            .iter()
            .copied()
            .find(|kind| {
                let label = normalize(kind.label());
                label == wanted || label.replace(' ', "") == squashed
            })
            .ok_or_else(|| SoliError::InvalidArgument(format!("unknown category: {s}")))
    }
}
