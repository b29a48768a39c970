use grocery_storefront::{
    config::parse_id_list,
    images::{normalize_image_path, normalize_optional},
    models::Role,
    services::vendor_service::{avatar_object_path, generate_password},
};

#[test]
fn relative_asset_paths_become_site_root_paths() {
    assert_eq!(normalize_image_path("../assets/apple.png"), "/apple.png");
    assert_eq!(normalize_image_path("../../assets/img/pear.jpg"), "/img/pear.jpg");
    assert_eq!(normalize_image_path("/already/root.png"), "/already/root.png");
    assert_eq!(
        normalize_image_path("https://cdn.example.com/assets/a.png"),
        "https://cdn.example.com/assets/a.png"
    );
    assert_eq!(normalize_optional(None), None);
}

#[test]
fn generated_passwords_have_expected_shape() {
    let password = generate_password();

    assert_eq!(password.len(), 19);
    assert!(password.ends_with("A1!aB2@"));
    assert!(
        password[..12]
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    );
    assert_ne!(generate_password(), generate_password());
}

#[test]
fn avatar_path_strips_email_punctuation() {
    assert_eq!(
        avatar_object_path("jane.doe+shop@example.com", 1_700_000_000_000),
        "avatars/janedoeshopexamplecom_1700000000000.png"
    );
}

#[test]
fn id_list_skips_blanks_and_rejects_garbage() {
    assert_eq!(parse_id_list("1, 2,,7 ").expect("valid list"), vec![1, 2, 7]);
    assert!(parse_id_list("").expect("empty list").is_empty());
    assert!(parse_id_list("1,two").is_err());
}

#[test]
fn roles_round_trip_through_strings() {
    for role in [Role::Admin, Role::Vendor, Role::DisabledVendor, Role::Shopper] {
        assert_eq!(role.as_str().parse::<Role>().expect("known role"), role);
    }
    assert!("superuser".parse::<Role>().is_err());
}
