//! County name qualification. Every county label the pipeline emits carries a `", XX"` state
//! suffix so same-named counties across state lines (Cass ND / Cass MN) never collide, and so
//! labels line up with polygon sources that are keyed the same way.

/// Qualifies a bare county name with a state suffix: `("Cass", "ND")` → `"Cass, ND"`.
///
/// ```
/// use ndawn_gdd::normalize_county;
///
/// assert_eq!(normalize_county(" Cass ", "ND"), "Cass, ND");
/// ```
pub fn normalize_county(name: &str, state: &str) -> String {
    format!("{}, {}", name.trim(), state.trim())
}

/// Postal suffix for a two digit state FIPS code, as found in census county shapefiles.
pub fn state_suffix_for_fips(fips: &str) -> Option<&'static str> {
    let suffix = match fips {
        "01" => "AL",
        "02" => "AK",
        "04" => "AZ",
        "05" => "AR",
        "06" => "CA",
        "08" => "CO",
        "09" => "CT",
        "10" => "DE",
        "11" => "DC",
        "12" => "FL",
        "13" => "GA",
        "15" => "HI",
        "16" => "ID",
        "17" => "IL",
        "18" => "IN",
        "19" => "IA",
        "20" => "KS",
        "21" => "KY",
        "22" => "LA",
        "23" => "ME",
        "24" => "MD",
        "25" => "MA",
        "26" => "MI",
        "27" => "MN",
        "28" => "MS",
        "29" => "MO",
        "30" => "MT",
        "31" => "NE",
        "32" => "NV",
        "33" => "NH",
        "34" => "NJ",
        "35" => "NM",
        "36" => "NY",
        "37" => "NC",
        "38" => "ND",
        "39" => "OH",
        "40" => "OK",
        "41" => "OR",
        "42" => "PA",
        "44" => "RI",
        "45" => "SC",
        "46" => "SD",
        "47" => "TN",
        "48" => "TX",
        "49" => "UT",
        "50" => "VT",
        "51" => "VA",
        "53" => "WA",
        "54" => "WV",
        "55" => "WI",
        "56" => "WY",
        _ => return None,
    };
    Some(suffix)
}

/// Qualifies a polygon's county name using the polygon's state FIPS code.
pub fn normalize_polygon_county(name: &str, state_fips: &str) -> Option<String> {
    state_suffix_for_fips(state_fips).map(|state| normalize_county(name, state))
}
