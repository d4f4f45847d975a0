//! Built-in speech voices offered by the synthesis model.
//!
//! Cloned voices are not listed here; they are plain [`VoiceId`]s returned
//! by a clone job.

use crate::voice_id::VoiceId;
use std::fmt;
use strum::{EnumIter, IntoEnumIterator};

/// Preset voices with strong typing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum PresetVoice {
    /// Calm, knowing narrator with a gentle pace
    WiseWoman,
    /// Warm, upbeat everyday voice
    FriendlyPerson,
    /// Bright, motivating young female voice
    InspirationalGirl,
    /// Low, resonant male voice
    DeepVoiceMan,
    /// Soft, soothing female voice
    CalmWoman,
    /// Relaxed, conversational male voice
    CasualGuy,
    /// Energetic, playful female voice
    LivelyGirl,
    /// Steady, reassuring male voice
    PatientMan,
    /// Heroic, youthful male voice
    YoungKnight,
    /// Firm, resolute male voice
    DeterminedMan,
    /// Sweet, tender female voice
    LovelyGirl,
    /// Polite, well-spoken boy
    DecentBoy,
    /// Commanding, formal voice
    ImposingManner,
    /// Refined, smooth male voice
    ElegantMan,
    /// Serene, solemn female voice
    Abbess,
    /// Gentle, cheerful female voice
    SweetGirl,
    /// Excited, expressive female voice
    ExuberantGirl,
}

/// Catalog entry for a preset voice.
#[derive(Debug, Clone)]
pub struct PresetVoiceInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

impl PresetVoice {
    /// Identifier sent as `voice_id` to the synthesis model
    pub fn id(self) -> &'static str {
        match self {
            PresetVoice::WiseWoman => "Wise_Woman",
            PresetVoice::FriendlyPerson => "Friendly_Person",
            PresetVoice::InspirationalGirl => "Inspirational_girl",
            PresetVoice::DeepVoiceMan => "Deep_Voice_Man",
            PresetVoice::CalmWoman => "Calm_Woman",
            PresetVoice::CasualGuy => "Casual_Guy",
            PresetVoice::LivelyGirl => "Lively_Girl",
            PresetVoice::PatientMan => "Patient_Man",
            PresetVoice::YoungKnight => "Young_Knight",
            PresetVoice::DeterminedMan => "Determined_Man",
            PresetVoice::LovelyGirl => "Lovely_Girl",
            PresetVoice::DecentBoy => "Decent_Boy",
            PresetVoice::ImposingManner => "Imposing_Manner",
            PresetVoice::ElegantMan => "Elegant_Man",
            PresetVoice::Abbess => "Abbess",
            PresetVoice::SweetGirl => "Sweet_Girl_2",
            PresetVoice::ExuberantGirl => "Exuberant_Girl",
        }
    }

    /// Human-readable name shown in voice pickers
    pub fn name(self) -> &'static str {
        match self {
            PresetVoice::WiseWoman => "Wise Woman",
            PresetVoice::FriendlyPerson => "Friendly Person",
            PresetVoice::InspirationalGirl => "Inspirational Girl",
            PresetVoice::DeepVoiceMan => "Deep Voice Man",
            PresetVoice::CalmWoman => "Calm Woman",
            PresetVoice::CasualGuy => "Casual Guy",
            PresetVoice::LivelyGirl => "Lively Girl",
            PresetVoice::PatientMan => "Patient Man",
            PresetVoice::YoungKnight => "Young Knight",
            PresetVoice::DeterminedMan => "Determined Man",
            PresetVoice::LovelyGirl => "Lovely Girl",
            PresetVoice::DecentBoy => "Decent Boy",
            PresetVoice::ImposingManner => "Imposing Manner",
            PresetVoice::ElegantMan => "Elegant Man",
            PresetVoice::Abbess => "Abbess",
            PresetVoice::SweetGirl => "Sweet Girl",
            PresetVoice::ExuberantGirl => "Exuberant Girl",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PresetVoice::WiseWoman => "Calm, knowing narrator with a gentle pace",
            PresetVoice::FriendlyPerson => "Warm, upbeat everyday voice",
            PresetVoice::InspirationalGirl => "Bright, motivating young female voice",
            PresetVoice::DeepVoiceMan => "Low, resonant male voice",
            PresetVoice::CalmWoman => "Soft, soothing female voice",
            PresetVoice::CasualGuy => "Relaxed, conversational male voice",
            PresetVoice::LivelyGirl => "Energetic, playful female voice",
            PresetVoice::PatientMan => "Steady, reassuring male voice",
            PresetVoice::YoungKnight => "Heroic, youthful male voice",
            PresetVoice::DeterminedMan => "Firm, resolute male voice",
            PresetVoice::LovelyGirl => "Sweet, tender female voice",
            PresetVoice::DecentBoy => "Polite, well-spoken boy",
            PresetVoice::ImposingManner => "Commanding, formal voice",
            PresetVoice::ElegantMan => "Refined, smooth male voice",
            PresetVoice::Abbess => "Serene, solemn female voice",
            PresetVoice::SweetGirl => "Gentle, cheerful female voice",
            PresetVoice::ExuberantGirl => "Excited, expressive female voice",
        }
    }

    /// Get complete catalog entry
    pub fn info(self) -> PresetVoiceInfo {
        PresetVoiceInfo {
            id: self.id(),
            name: self.name(),
            description: self.description(),
        }
    }

    /// Look up a voice by wire id or display name (case-insensitive)
    pub fn from_name(name: &str) -> Option<PresetVoice> {
        let wanted = name.trim();
        Self::iter().find(|voice| {
            voice.id().eq_ignore_ascii_case(wanted) || voice.name().eq_ignore_ascii_case(wanted)
        })
    }

    /// Get all available voices
    pub fn all() -> Vec<PresetVoice> {
        Self::iter().collect()
    }
}

impl fmt::Display for PresetVoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<PresetVoice> for VoiceId {
    fn from(voice: PresetVoice) -> VoiceId {
        VoiceId::new(voice.id())
    }
}
