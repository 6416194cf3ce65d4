pub mod rsa_cipher;
