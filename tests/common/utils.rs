use form_submit::form::form_model::{FieldName, FormPatch};

pub const VALID_FIO: &str = "Иванов Иван Иванович";
pub const VALID_EMAIL: &str = "user@yandex.ru";
/// Digit sum 16, formats to +7(900)000-00-00
pub const VALID_PHONE: &str = "79000000000";

pub fn valid_patch() -> FormPatch {
    FormPatch::new()
        .with(FieldName::Fio, VALID_FIO)
        .with(FieldName::Email, VALID_EMAIL)
        .with(FieldName::Phone, VALID_PHONE)
}

pub fn fixture(name: &str) -> String {
    let base = std::env::current_dir().unwrap();
    let path = base.join("tests").join("fixtures").join(name);

    path.display().to_string()
}
