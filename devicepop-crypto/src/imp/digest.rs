use rsa::{Oaep, Pkcs1v15Sign, Pss};
use sha2::{Digest, Sha256, Sha384, Sha512};

/// SHA-2 digests usable with RSA signature and OAEP schemes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DigestAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl DigestAlgorithm {
    pub fn output_len(&self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    pub fn digest(&self, input: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha256 => Sha256::digest(input).to_vec(),
            Self::Sha384 => Sha384::digest(input).to_vec(),
            Self::Sha512 => Sha512::digest(input).to_vec(),
        }
    }

    pub(crate) fn pkcs1v15(&self) -> Pkcs1v15Sign {
        match self {
            Self::Sha256 => Pkcs1v15Sign::new::<Sha256>(),
            Self::Sha384 => Pkcs1v15Sign::new::<Sha384>(),
            Self::Sha512 => Pkcs1v15Sign::new::<Sha512>(),
        }
    }

    pub(crate) fn pss(&self) -> Pss {
        match self {
            Self::Sha256 => Pss::new::<Sha256>(),
            Self::Sha384 => Pss::new::<Sha384>(),
            Self::Sha512 => Pss::new::<Sha512>(),
        }
    }

    pub(crate) fn oaep(&self, label: Option<&str>) -> Oaep {
        match (self, label) {
            (Self::Sha256, None) => Oaep::new::<Sha256>(),
            (Self::Sha384, None) => Oaep::new::<Sha384>(),
            (Self::Sha512, None) => Oaep::new::<Sha512>(),
            (Self::Sha256, Some(label)) => Oaep::new_with_label::<Sha256, _>(label),
            (Self::Sha384, Some(label)) => Oaep::new_with_label::<Sha384, _>(label),
            (Self::Sha512, Some(label)) => Oaep::new_with_label::<Sha512, _>(label),
        }
    }
}
