/// One of the 24 tonal centres a track can be detected in
///
/// Written to the dataset twice: as a name (`"F# Minor"`) and as a Camelot code (`"11A"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicalKey {
    CMajor,
    DbMajor,
    DMajor,
    EbMajor,
    EMajor,
    FMajor,
    GbMajor,
    GMajor,
    AbMajor,
    AMajor,
    BbMajor,
    BMajor,

    CMinor,
    CsMinor,
    DMinor,
    EbMinor,
    EMinor,
    FMinor,
    FsMinor,
    GMinor,
    AbMinor,
    AMinor,
    BbMinor,
    BMinor,
}

impl MusicalKey {
    /// Parse a key name as reported by the analysis backend.
    ///
    /// Accepts "C# minor", "Db Major", "c#m", "ebmin", "F" and similar spellings.
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_lowercase();

        let key = match lower.as_str() {
            "c major" | "cmaj" | "c" => MusicalKey::CMajor,
            "c# major" | "db major" | "c#maj" | "dbmaj" | "c#" | "db" => MusicalKey::DbMajor,
            "d major" | "dmaj" | "d" => MusicalKey::DMajor,
            "d# major" | "eb major" | "d#maj" | "ebmaj" | "d#" | "eb" => MusicalKey::EbMajor,
            "e major" | "emaj" | "e" => MusicalKey::EMajor,
            "f major" | "fmaj" | "f" => MusicalKey::FMajor,
            "f# major" | "gb major" | "f#maj" | "gbmaj" | "f#" | "gb" => MusicalKey::GbMajor,
            "g major" | "gmaj" | "g" => MusicalKey::GMajor,
            "g# major" | "ab major" | "g#maj" | "abmaj" | "g#" | "ab" => MusicalKey::AbMajor,
            "a major" | "amaj" | "a" => MusicalKey::AMajor,
            "a# major" | "bb major" | "a#maj" | "bbmaj" | "a#" | "bb" => MusicalKey::BbMajor,
            "b major" | "bmaj" | "b" => MusicalKey::BMajor,

            "c minor" | "cm" | "cmin" => MusicalKey::CMinor,
            "c# minor" | "db minor" | "c#m" | "c#min" | "dbm" | "dbmin" => MusicalKey::CsMinor,
            "d minor" | "dm" | "dmin" => MusicalKey::DMinor,
            "d# minor" | "eb minor" | "d#m" | "d#min" | "ebm" | "ebmin" => MusicalKey::EbMinor,
            "e minor" | "em" | "emin" => MusicalKey::EMinor,
            "f minor" | "fm" | "fmin" => MusicalKey::FMinor,
            "f# minor" | "gb minor" | "f#m" | "f#min" | "gbm" | "gbmin" => MusicalKey::FsMinor,
            "g minor" | "gm" | "gmin" => MusicalKey::GMinor,
            "g# minor" | "ab minor" | "g#m" | "g#min" | "abm" | "abmin" => MusicalKey::AbMinor,
            "a minor" | "am" | "amin" => MusicalKey::AMinor,
            "a# minor" | "bb minor" | "a#m" | "a#min" | "bbm" | "bbmin" => MusicalKey::BbMinor,
            "b minor" | "bm" | "bmin" => MusicalKey::BMinor,

            _ => return None,
        };

        Some(key)
    }

    /// Human-readable key name, as written to the dataset
    pub fn name(&self) -> &'static str {
        match self {
            MusicalKey::CMajor => "C Major",
            MusicalKey::DbMajor => "Db Major",
            MusicalKey::DMajor => "D Major",
            MusicalKey::EbMajor => "Eb Major",
            MusicalKey::EMajor => "E Major",
            MusicalKey::FMajor => "F Major",
            MusicalKey::GbMajor => "Gb Major",
            MusicalKey::GMajor => "G Major",
            MusicalKey::AbMajor => "Ab Major",
            MusicalKey::AMajor => "A Major",
            MusicalKey::BbMajor => "Bb Major",
            MusicalKey::BMajor => "B Major",

            MusicalKey::CMinor => "C Minor",
            MusicalKey::CsMinor => "C# Minor",
            MusicalKey::DMinor => "D Minor",
            MusicalKey::EbMinor => "Eb Minor",
            MusicalKey::EMinor => "E Minor",
            MusicalKey::FMinor => "F Minor",
            MusicalKey::FsMinor => "F# Minor",
            MusicalKey::GMinor => "G Minor",
            MusicalKey::AbMinor => "Ab Minor",
            MusicalKey::AMinor => "A Minor",
            MusicalKey::BbMinor => "Bb Minor",
            MusicalKey::BMinor => "B Minor",
        }
    }

    /// Camelot wheel code (e.g. "8B" for C major, "8A" for A minor)
    pub fn camelot(&self) -> &'static str {
        match self {
            MusicalKey::CMajor => "8B",
            MusicalKey::DbMajor => "3B",
            MusicalKey::DMajor => "10B",
            MusicalKey::EbMajor => "5B",
            MusicalKey::EMajor => "12B",
            MusicalKey::FMajor => "7B",
            MusicalKey::GbMajor => "2B",
            MusicalKey::GMajor => "9B",
            MusicalKey::AbMajor => "4B",
            MusicalKey::AMajor => "11B",
            MusicalKey::BbMajor => "6B",
            MusicalKey::BMajor => "1B",

            MusicalKey::CMinor => "5A",
            MusicalKey::CsMinor => "12A",
            MusicalKey::DMinor => "7A",
            MusicalKey::EbMinor => "2A",
            MusicalKey::EMinor => "9A",
            MusicalKey::FMinor => "4A",
            MusicalKey::FsMinor => "11A",
            MusicalKey::GMinor => "6A",
            MusicalKey::AbMinor => "1A",
            MusicalKey::AMinor => "8A",
            MusicalKey::BbMinor => "3A",
            MusicalKey::BMinor => "10A",
        }
    }
}
