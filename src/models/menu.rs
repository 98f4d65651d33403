use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuOption {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub price: String,
    pub duration: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl MenuOption {
    /// Price label as whole yen, e.g. `"¥9,800"` -> 9800.
    pub fn price_yen(&self) -> Option<i64> {
        parse_price_yen(&self.price)
    }

    /// Duration label as minutes, e.g. `"60分"` -> 60.
    pub fn duration_minutes(&self) -> Option<i32> {
        parse_duration_minutes(&self.duration)
    }
}

/// Digits of a price label, ignoring the currency sign and separators.
pub fn parse_price_yen(label: &str) -> Option<i64> {
    let digits: String = label.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

pub fn parse_duration_minutes(label: &str) -> Option<i32> {
    let digits: String = label
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok().filter(|m| *m > 0)
}

struct CatalogEntry {
    id: u32,
    name: &'static str,
    description: &'static str,
    price: &'static str,
    duration: &'static str,
    image: &'static str,
    tag: Option<&'static str>,
}

const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        id: 1,
        name: "ハイドラフェイシャル全顔",
        description: "毛穴の黒ずみ・角栓を徹底洗浄。透明感のある肌へ導きます。",
        price: "¥9,800",
        duration: "60分",
        image: "/images/skin/002.webp",
        tag: Some("人気No.1"),
    },
    CatalogEntry {
        id: 2,
        name: "ピコレーザートーニング",
        description: "シミ・肝斑を薄くし透明感へ。ダウンタイムほぼなし。",
        price: "¥12,000",
        duration: "45分",
        image: "/images/skin/003.webp",
        tag: Some("おすすめ"),
    },
    CatalogEntry {
        id: 3,
        name: "ウルセラリフト（全顔）",
        description: "切らないフェイスリフト。圧倒的な引き上げ効果を実感。",
        price: "¥128,000",
        duration: "90分",
        image: "/images/skin/012.webp",
        tag: None,
    },
    CatalogEntry {
        id: 4,
        name: "高濃度ビタミン点滴",
        description: "内側から輝く白玉肌へ。疲労回復にも効果的。",
        price: "¥15,000",
        duration: "30分",
        image: "/images/skin/013.webp",
        tag: None,
    },
    CatalogEntry {
        id: 5,
        name: "ダーマペン4",
        description: "肌質改善・毛穴・ニキビ跡に。コラーゲン生成を促進。",
        price: "¥19,800",
        duration: "50分",
        image: "/images/skin/022.webp",
        tag: None,
    },
];

/// The clinic's treatment menu.
pub fn catalog() -> Vec<MenuOption> {
    CATALOG
        .iter()
        .map(|e| MenuOption {
            id: e.id,
            name: e.name.to_string(),
            description: e.description.to_string(),
            price: e.price.to_string(),
            duration: e.duration.to_string(),
            image: e.image.to_string(),
            tag: e.tag.map(str::to_string),
        })
        .collect()
}

pub fn find_menu(id: u32) -> Option<MenuOption> {
    catalog().into_iter().find(|m| m.id == id)
}
