use super::*;
use std::path::Path;

fn at() -> NaiveDateTime {
    chrono::NaiveDate::from_ymd_opt(2024, 3, 7)
        .and_then(|d| d.and_hms_opt(9, 5, 2))
        .unwrap()
}

#[test]
fn explicit_filename_wins() {
    assert_eq!(format_filename("loop", "pre-", "-suf", &at()), "loop");
}

#[test]
fn timestamp_is_zero_padded() {
    assert_eq!(
        format_filename("", "pre-", "-suf", &at()),
        "pre-2024.03.07-09.05.02-suf"
    );
    assert_eq!(format_filename("", "", "", &at()), "2024.03.07-09.05.02");
}

#[test]
fn output_path_joins_out_dir_and_extension() {
    let mut s = ResolvedSettings::defaults();
    s.out_dir = "renders".into();
    s.prefix = "s-".to_owned();
    assert_eq!(
        output_path(&s, "png", &at()),
        Path::new("renders/s-2024.03.07-09.05.02.png")
    );
    s.filename = "frames".to_owned();
    assert_eq!(output_path(&s, "", &at()), Path::new("renders/frames"));
}
