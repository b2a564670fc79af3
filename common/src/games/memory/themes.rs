use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IconTheme {
    #[default]
    Animals,
    Fruits,
    Emojis,
    Vehicles,
}

impl IconTheme {
    pub const ALL: [IconTheme; 4] = [
        IconTheme::Animals,
        IconTheme::Fruits,
        IconTheme::Emojis,
        IconTheme::Vehicles,
    ];

    /// Eighteen icons each, enough for a 6x6 deal.
    pub fn icons(self) -> &'static [&'static str] {
        match self {
            IconTheme::Animals => &[
                "🐶", "🐱", "🐭", "🐹", "🐰", "🦊", "🐻", "🐼", "🐨", "🐯", "🦁", "🐮", "🐷",
                "🐸", "🐵", "🐔", "🐧", "🦄",
            ],
            IconTheme::Fruits => &[
                "🍎", "🍐", "🍊", "🍋", "🍌", "🍉", "🍇", "🍓", "🍒", "🥭", "🥑", "🥝", "🍍",
                "🥥", "🍑", "🍅", "🫐", "🍈",
            ],
            IconTheme::Emojis => &[
                "😀", "😂", "😍", "🤔", "😎", "🥳", "🤩", "😜", "🤪", "😇", "🥺", "😉", "😋",
                "🤤", "😱", "😴", "🤠", "🤓",
            ],
            IconTheme::Vehicles => &[
                "🚗", "🚕", "🚙", "🚌", "🚎", "🏎️", "🚓", "🚑", "🚒", "🚐", "🚚", "🚛", "🚜",
                "✈️", "🚀", "🚢", "🚲", "🚁",
            ],
        }
    }
}
