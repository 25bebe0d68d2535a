//! Fixed set of regions and the default minimum-wage table (yen per hour).

pub const REGION_COUNT: usize = 47;

/// Default minimum hourly wages in canonical region order.
pub const DEFAULT_MINIMUM_WAGES: [(&str, u32); REGION_COUNT] = [
    ("北海道", 1075),
    ("青森", 1029),
    ("岩手", 1031),
    ("宮城", 1038),
    ("秋田", 1031),
    ("山形", 1032),
    ("福島", 1033),
    ("茨城", 1074),
    ("栃木", 1068),
    ("群馬", 1063),
    ("埼玉", 1141),
    ("千葉", 1140),
    ("東京", 1226),
    ("神奈川", 1225),
    ("新潟", 1050),
    ("富山", 1062),
    ("石川", 1054),
    ("福井", 1053),
    ("山梨", 1052),
    ("長野", 1061),
    ("岐阜", 1065),
    ("静岡", 1097),
    ("愛知", 1140),
    ("三重", 1087),
    ("滋賀", 1080),
    ("京都", 1122),
    ("大阪", 1177),
    ("兵庫", 1116),
    ("奈良", 1051),
    ("和歌山", 1045),
    ("鳥取", 1030),
    ("島根", 1033),
    ("岡山", 1047),
    ("広島", 1085),
    ("山口", 1043),
    ("徳島", 1046),
    ("香川", 1036),
    ("愛媛", 1033),
    ("高知", 1023),
    ("福岡", 1057),
    ("佐賀", 1030),
    ("長崎", 1031),
    ("熊本", 1034),
    ("大分", 1035),
    ("宮崎", 1023),
    ("鹿児島", 1026),
    ("沖縄", 1023),
];

/// Region names in matching priority: longer names first, canonical order within a length.
pub const MATCH_ORDER: [&str; REGION_COUNT] = [
    "北海道", "神奈川", "和歌山", "鹿児島", "青森", "岩手", "宮城", "秋田", "山形", "福島",
    "茨城", "栃木", "群馬", "埼玉", "千葉", "東京", "新潟", "富山", "石川", "福井", "山梨",
    "長野", "岐阜", "静岡", "愛知", "三重", "滋賀", "京都", "大阪", "兵庫", "奈良", "鳥取",
    "島根", "岡山", "広島", "山口", "徳島", "香川", "愛媛", "高知", "福岡", "佐賀", "長崎",
    "熊本", "大分", "宮崎", "沖縄",
];

/// Canonical spelling of `name` when it is exactly one of the known regions.
pub fn canonical(name: &str) -> Option<&'static str> {
    DEFAULT_MINIMUM_WAGES
        .iter()
        .map(|(region, _)| *region)
        .find(|region| *region == name)
}

pub fn is_region(name: &str) -> bool {
    canonical(name).is_some()
}

/// Leftmost region name occurring in `text`; at each position longer names win.
pub fn find_region(text: &str) -> Option<&'static str> {
    text.char_indices().find_map(|(offset, _)| {
        let rest = &text[offset..];
        MATCH_ORDER
            .iter()
            .copied()
            .find(|region| rest.starts_with(region))
    })
}
