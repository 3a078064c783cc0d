//! Document protection settings

use serde::{Deserialize, Serialize};

/// Editing restriction applied to the whole document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProtectionType {
    #[default]
    None,
    ReadOnly,
    Forms,
    Comments,
    TrackedChanges,
}

impl ProtectionType {
    pub fn ooxml_value(&self) -> &'static str {
        match self {
            ProtectionType::None => "none",
            ProtectionType::ReadOnly => "readOnly",
            ProtectionType::Forms => "forms",
            ProtectionType::Comments => "comments",
            ProtectionType::TrackedChanges => "trackedChanges",
        }
    }
}

/// Protection applied at the document level. The password, when present,
/// is hashed with the legacy Word algorithm at write time; the model only
/// carries the cleartext and the hashing inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentProtection {
    pub protection_type: ProtectionType,
    pub password: Option<String>,
    /// 16 salt bytes fed to the spin loop. Generated lazily when a
    /// password is set and no salt was supplied.
    pub salt: Option<[u8; 16]>,
    pub spin_count: u32,
}

impl Default for DocumentProtection {
    fn default() -> Self {
        Self {
            protection_type: ProtectionType::None,
            password: None,
            salt: None,
            spin_count: 100_000,
        }
    }
}

impl DocumentProtection {
    pub fn new(protection_type: ProtectionType) -> Self {
        Self {
            protection_type,
            ..Default::default()
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_salt(mut self, salt: [u8; 16]) -> Self {
        self.salt = Some(salt);
        self
    }

    pub fn is_enforced(&self) -> bool {
        self.protection_type != ProtectionType::None
    }

    /// Salt to use for hashing, generating a random one if none was set
    pub fn effective_salt(&self) -> [u8; 16] {
        match self.salt {
            Some(salt) => salt,
            None => rand::random(),
        }
    }
}
