/// CustomSound entity
///
/// An uploaded audio track, kept inline as an embeddable string (normally a
/// data URI). The core never inspects the media itself.

use serde::{Deserialize, Serialize};
use crate::domain::{DomainError, SoundId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomSound {
    pub id: SoundId,
    pub name: String,
    pub data: String,
}

impl CustomSound {
    pub fn new(name: String, data: String) -> Result<Self, DomainError> {
        if data.is_empty() {
            return Err(DomainError::InvalidValue {
                message: "Sound data cannot be empty".to_string(),
            });
        }

        Ok(Self {
            id: SoundId::new(),
            name,
            data,
        })
    }

    /// Build a sound from an uploaded file, naming it after the file stem
    ///
    /// `"rain at night.mp3"` becomes `"rain at night"`.
    pub fn from_upload(file_name: &str, data: String) -> Result<Self, DomainError> {
        let name = match file_name.rfind('.') {
            Some(dot) if dot > 0 => &file_name[..dot],
            _ => file_name,
        };
        Self::new(name.to_string(), data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_strips_extension() {
        let sound =
            CustomSound::from_upload("rain.at.night.mp3", "data:audio/mpeg;base64,AA".to_string())
                .unwrap();
        assert_eq!(sound.name, "rain.at.night");
        assert!(sound.id.as_str().starts_with("custom_"));
    }

    #[test]
    fn test_upload_without_extension() {
        let sound = CustomSound::from_upload(".hidden", "x".to_string()).unwrap();
        assert_eq!(sound.name, ".hidden");
    }

    #[test]
    fn test_empty_data_rejected() {
        assert!(CustomSound::new("Waves".to_string(), String::new()).is_err());
    }
}
