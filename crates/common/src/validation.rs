//! Pre-condition checks for user input
//!
//! Each check is a pure function of its input and a snapshot of whatever it
//! has to check against. The `Display` of [`ValidationError`] is the reason
//! shown back to the user.

use crate::assets::AssetLookup;
use crate::credentials::Credentials;
use crate::document::{is_flat_name, naming, DOCUMENT_EXTENSIONS};

/// Extensions accepted for image references
pub const IMAGE_EXTENSIONS: [&str; 3] = [".jpg", ".jpeg", ".png"];

pub const MIN_USERNAME_LEN: usize = 4;
pub const MIN_PASSWORD_LEN: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("A name is required")]
    NameRequired,
    #[error("Invalid name\n(Names cannot contain slashes or \"..\", or start with \".\".)")]
    InvalidName,
    #[error("Invalid file type\n(Currently accepting: {}.)", DOCUMENT_EXTENSIONS.join(", "))]
    InvalidFileType,
    #[error("{0} exists already!")]
    DocumentExists(String),
    #[error("User name must be at least {} characters long.", MIN_USERNAME_LEN)]
    UsernameTooShort,
    #[error("This user name exists already, please choose a different one.")]
    UsernameTaken,
    #[error("Password must be at least {} characters long.", MIN_PASSWORD_LEN)]
    PasswordTooShort,
    #[error("Image cannot be found.")]
    ImageNotFound,
    #[error("Description cannot be empty.")]
    DescriptionRequired,
    #[error("Invalid image type. Currently accepting: {}.", IMAGE_EXTENSIONS.join(", "))]
    InvalidImageType,
}

fn has_extension_in(name: &str, allowed: &[&str]) -> bool {
    naming::extension(name)
        .map(|ext| allowed.iter().any(|a| a.trim_start_matches('.') == ext))
        .unwrap_or(false)
}

pub fn validate_new_document_name<S: AsRef<str>>(
    name: &str,
    existing: &[S],
) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    if !is_flat_name(name) {
        return Err(ValidationError::InvalidName);
    }
    if !has_extension_in(name, &DOCUMENT_EXTENSIONS) {
        return Err(ValidationError::InvalidFileType);
    }
    if existing.iter().any(|n| AsRef::<str>::as_ref(n) == name) {
        return Err(ValidationError::DocumentExists(name.to_string()));
    }
    Ok(())
}

pub fn validate_new_username(
    username: &str,
    credentials: &Credentials,
) -> Result<(), ValidationError> {
    if username.chars().count() < MIN_USERNAME_LEN {
        return Err(ValidationError::UsernameTooShort);
    }
    if credentials.contains_key(username) {
        return Err(ValidationError::UsernameTaken);
    }
    Ok(())
}

pub fn validate_new_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

pub fn validate_new_image(
    image_name: &str,
    description: &str,
    assets: &impl AssetLookup,
) -> Result<(), ValidationError> {
    if !assets.contains(image_name) {
        return Err(ValidationError::ImageNotFound);
    }
    if description.is_empty() {
        return Err(ValidationError::DescriptionRequired);
    }
    if !has_extension_in(image_name, &IMAGE_EXTENSIONS) {
        return Err(ValidationError::InvalidImageType);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    struct Assets(HashSet<&'static str>);

    impl AssetLookup for Assets {
        fn contains(&self, name: &str) -> bool {
            self.0.contains(name)
        }
    }

    fn assets() -> Assets {
        Assets(["1.jpg", "2.png", "3.jpeg", "1.pdf"].into_iter().collect())
    }

    #[test]
    fn test_document_name_required() {
        let err = validate_new_document_name::<&str>("", &[]).unwrap_err();
        assert_eq!(err, ValidationError::NameRequired);
        assert_eq!(err.to_string(), "A name is required");
    }

    #[test]
    fn test_document_name_invalid_type() {
        for name in ["x", "noextension", "image.png", "about.md_copy1"] {
            let err = validate_new_document_name::<&str>(name, &[]).unwrap_err();
            assert_eq!(err, ValidationError::InvalidFileType);
        }
        let message = ValidationError::InvalidFileType.to_string();
        assert!(message.starts_with("Invalid file type"));
        assert!(message.contains(".txt, .md"));
    }

    #[test]
    fn test_document_name_must_be_flat() {
        for name in ["../x.md", "nested/file.txt", ".hidden.md", "a..b.md", "..\\x.md"] {
            let err = validate_new_document_name::<&str>(name, &[]).unwrap_err();
            assert_eq!(err, ValidationError::InvalidName);
        }
        assert!(ValidationError::InvalidName
            .to_string()
            .starts_with("Invalid name"));
        assert_eq!(validate_new_document_name::<&str>("with space.md", &[]), Ok(()));
    }

    #[test]
    fn test_document_name_exists() {
        let existing = ["about.md", "changes.txt"];
        let err = validate_new_document_name("about.md", &existing).unwrap_err();
        assert_eq!(err.to_string(), "about.md exists already!");
        assert_eq!(validate_new_document_name("history.txt", &existing), Ok(()));
    }

    #[test]
    fn test_username() {
        let mut credentials = Credentials::new();
        credentials.insert("admin".to_string(), "hash".to_string());

        assert_eq!(
            validate_new_username("ann", &credentials),
            Err(ValidationError::UsernameTooShort)
        );
        assert_eq!(
            validate_new_username("admin", &credentials),
            Err(ValidationError::UsernameTaken)
        );
        // case-sensitive
        assert_eq!(validate_new_username("Admin", &credentials), Ok(()));
        assert_eq!(validate_new_username("anna", &credentials), Ok(()));
    }

    #[test]
    fn test_password() {
        assert_eq!(
            validate_new_password("pw1"),
            Err(ValidationError::PasswordTooShort)
        );
        assert_eq!(validate_new_password("pw12"), Ok(()));
    }

    #[test]
    fn test_image() {
        let assets = assets();
        assert_eq!(validate_new_image("1.jpg", "image", &assets), Ok(()));
        assert_eq!(validate_new_image("2.png", "image", &assets), Ok(()));
        assert_eq!(validate_new_image("3.jpeg", "image", &assets), Ok(()));
        assert_eq!(
            validate_new_image("none.jpg", "image", &assets),
            Err(ValidationError::ImageNotFound)
        );
        assert_eq!(
            validate_new_image("1.jpg", "", &assets),
            Err(ValidationError::DescriptionRequired)
        );
        let err = validate_new_image("1.pdf", "image", &assets).unwrap_err();
        assert_eq!(err, ValidationError::InvalidImageType);
        assert!(err.to_string().starts_with("Invalid image type."));
    }
}
