use devicepop_providers::{crypto::CipherParameters, key_storage::model::KeySecurity};
use strum_macros::{Display, EnumString};

/// Signature algorithms by JCA name.
#[derive(Debug, Copy, Clone, Display, EnumString, PartialEq, Eq, PartialOrd, Ord)]
pub enum SigningAlgorithm {
    #[strum(serialize = "MD5withRSA")]
    Md5WithRsa,
    #[strum(serialize = "NONEwithRSA")]
    NoneWithRsa,
    #[strum(serialize = "SHA256withRSA")]
    Sha256WithRsa,
    #[strum(serialize = "SHA256withRSA/PSS")]
    Sha256WithRsaPss,
    #[strum(serialize = "SHA384withRSA")]
    Sha384WithRsa,
    #[strum(serialize = "SHA384withRSA/PSS")]
    Sha384WithRsaPss,
    #[strum(serialize = "SHA512withRSA")]
    Sha512WithRsa,
    #[strum(serialize = "SHA512withRSA/PSS")]
    Sha512WithRsaPss,
}

/// Cipher transformations by JCA name.
#[derive(Debug, Copy, Clone, Display, EnumString, PartialEq, Eq, PartialOrd, Ord)]
pub enum CipherAlgorithm {
    #[strum(serialize = "RSA/ECB/PKCS1Padding")]
    RsaEcbPkcs1Padding,
    #[strum(serialize = "RSA/ECB/OAEPWithSHA-1AndMGF1Padding")]
    RsaEcbOaepWithSha1AndMgf1Padding,
    #[strum(serialize = "RSA/NONE/OAEPWithSHA-1AndMGF1Padding")]
    RsaNoneOaepWithSha1AndMgf1Padding,
    #[strum(serialize = "RSA/ECB/OAEPWithSHA-256AndMGF1Padding")]
    RsaEcbOaepWithSha256AndMgf1Padding,
    #[strum(serialize = "RSA/ECB/OAEPWithSHA-384AndMGF1Padding")]
    RsaEcbOaepWithSha384AndMgf1Padding,
    #[strum(serialize = "RSA/ECB/OAEPWithSHA-512AndMGF1Padding")]
    RsaEcbOaepWithSha512AndMgf1Padding,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherSpec {
    pub algorithm: CipherAlgorithm,
    pub parameters: Option<CipherParameters>,
}

impl CipherSpec {
    pub fn new(algorithm: CipherAlgorithm) -> Self {
        Self {
            algorithm,
            parameters: None,
        }
    }

    pub fn with_parameters(self, parameters: CipherParameters) -> Self {
        Self {
            parameters: Some(parameters),
            ..self
        }
    }
}

#[derive(Debug, Copy, Clone, Display, EnumString, PartialEq, Eq)]
pub enum PublicKeyFormat {
    /// Standard base64 of the DER SubjectPublicKeyInfo.
    #[strum(serialize = "X_509_SubjectPublicKeyInfo_ASN_1")]
    X509SubjectPublicKeyInfo,
    /// JSON of the public JWK.
    #[strum(serialize = "JWK")]
    Jwk,
}

/// Whether key operations happen inside a hardware security boundary.
#[derive(Debug, Copy, Clone, Display, PartialEq, Eq)]
pub enum SecureHardwareState {
    #[strum(serialize = "TRUE_ATTESTED")]
    TrueAttested,
    #[strum(serialize = "TRUE_UNATTESTED")]
    TrueUnattested,
    #[strum(serialize = "FALSE")]
    False,
    #[strum(serialize = "UNKNOWN_DOWNLEVEL")]
    UnknownDownlevel,
    #[strum(serialize = "UNKNOWN_QUERY_ERROR")]
    UnknownQueryError,
}

impl From<KeySecurity> for SecureHardwareState {
    fn from(security: KeySecurity) -> Self {
        match security {
            KeySecurity::Hardware { attested: true } => Self::TrueAttested,
            KeySecurity::Hardware { attested: false } => Self::TrueUnattested,
            KeySecurity::Software => Self::False,
            KeySecurity::Unknown => Self::UnknownDownlevel,
        }
    }
}
