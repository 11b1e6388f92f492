//! ConfigSource / SecretDecryptor ports - 設定と秘密情報

use crate::domain::ConfigError;

/// API キーなどの設定値を提供
pub trait ConfigSource: Send + Sync {
    /// 暗号化された（ホスト側で保存されたままの）API キー
    fn encrypted_api_key(&self) -> Option<String>;
}

/// ホスト側の暗号化サービス
///
/// 復号できないときは `ConfigError::Decrypt` を返す。
pub trait SecretDecryptor: Send + Sync {
    fn decrypt(&self, encrypted: &str) -> Result<String, ConfigError>;
}

/// 平文をそのまま返す（ローカル実行・テスト用）
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextDecryptor;

impl SecretDecryptor for PlainTextDecryptor {
    fn decrypt(&self, encrypted: &str) -> Result<String, ConfigError> {
        Ok(encrypted.to_string())
    }
}

/// 設定から API キーを取り出して復号する
pub fn resolve_api_key(
    config: &dyn ConfigSource,
    decryptor: &dyn SecretDecryptor,
) -> Result<String, ConfigError> {
    let encrypted = config
        .encrypted_api_key()
        .filter(|k| !k.trim().is_empty())
        .ok_or(ConfigError::Missing("rapidapi.api_key"))?;
    decryptor.decrypt(&encrypted)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Key(Option<&'static str>);

    impl ConfigSource for Key {
        fn encrypted_api_key(&self) -> Option<String> {
            self.0.map(str::to_string)
        }
    }

    struct Reversing;

    impl SecretDecryptor for Reversing {
        fn decrypt(&self, encrypted: &str) -> Result<String, ConfigError> {
            Ok(encrypted.chars().rev().collect())
        }
    }

    struct Rejecting;

    impl SecretDecryptor for Rejecting {
        fn decrypt(&self, _encrypted: &str) -> Result<String, ConfigError> {
            Err(ConfigError::Decrypt("unknown key version".to_string()))
        }
    }

    #[test]
    fn decryptor_failure_is_passed_through() {
        let err = resolve_api_key(&Key(Some("v9:abc")), &Rejecting).unwrap_err();
        assert!(matches!(err, ConfigError::Decrypt(ref m) if m == "unknown key version"));
    }

    #[test]
    fn api_key_goes_through_decryptor() {
        let key = resolve_api_key(&Key(Some("terces")), &Reversing).unwrap();
        assert_eq!(key, "secret");
    }

    #[test]
    fn missing_or_blank_key_is_an_error() {
        assert!(matches!(
            resolve_api_key(&Key(None), &PlainTextDecryptor),
            Err(ConfigError::Missing(_))
        ));
        assert!(matches!(
            resolve_api_key(&Key(Some("  ")), &PlainTextDecryptor),
            Err(ConfigError::Missing(_))
        ));
    }
}
