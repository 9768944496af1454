//! German display labels for calculator types and partner trades

/// Display name of a calculator type; unknown keys fall back to
/// `Wirtschaftlichkeit`
pub fn calculator_type_name(key: &str) -> &'static str {
    match key {
        "heizung" => "Heizungstausch",
        "pv" => "Photovoltaik",
        "daemmung" => "Dämmung",
        "komplett" => "Komplettsanierung",
        _ => "Wirtschaftlichkeit",
    }
}

/// Title of the calculator as used in running text
pub fn calculator_title(key: &str) -> &'static str {
    match key {
        "heizung" => "Heizungstausch-Rechner",
        "pv" => "Photovoltaik-Rechner",
        "daemmung" => "Dämmungs-Rechner",
        "komplett" => "Komplettsanierungs-Rechner",
        _ => "Wirtschaftlichkeitsrechner",
    }
}

/// Label of a trade key; unknown keys pass through unchanged
pub fn trade_label(key: &str) -> &str {
    match key {
        "heizung" => "Heizung / Sanitär",
        "elektro" => "Elektroinstallation",
        "daemmung" => "Wärmedämmung / WDVS",
        "dach" => "Dachdeckerei",
        "fenster" => "Fenster / Türen",
        "solar" => "Photovoltaik / Solar",
        "lueftung" => "Lüftungstechnik",
        "maler" => "Maler / Stuckateur",
        "maurer" => "Maurer / Trockenbau",
        "zimmerei" => "Zimmerei / Holzbau",
        other => other,
    }
}

/// Comma-separated trade labels
pub fn trades_formatted(trades: &[String]) -> String {
    trades
        .iter()
        .map(|t| trade_label(t))
        .collect::<Vec<_>>()
        .join(", ")
}
