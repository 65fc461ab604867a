use serde::Serialize;

/// Coarse country-of-origin grouping of vehicle makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Region {
    Japanese,
    European,
    American,
    Korean,
    Other,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Japanese => "Japanese",
            Region::European => "European",
            Region::American => "American",
            Region::Korean => "Korean",
            Region::Other => "Other",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub static JAPANESE_MAKES: &[&str] = &[
    "toyota", "isuzu", "honda", "nissan", "subaru", "mazda", "iszuzu", "mitsubishi", "suzuki",
    "daihatsu", "lexus", "infiniti", "acura", "scion",
];

pub static EUROPEAN_MAKES: &[&str] = &[
    "volkswagen", "geo", "rolls-royce", "fisker", "audi", "bmw", "mercedes-benz", "porsche",
    "volvo", "saab", "fiat", "alfa", "jaguar", "land rover", "mini", "smart", "bentley",
    "rolls royce", "aston martin", "lotus", "maserati", "lamborghini", "ferrari",
];

pub static AMERICAN_MAKES: &[&str] = &[
    "ford", "ram", "chevrolet", "dodge", "jeep", "chrysler", "cadillac", "lincoln", "buick", "gmc",
    "plymouth", "saturn", "pontiac", "oldsmobile", "mercury", "hummer", "tesla",
];

pub static KOREAN_MAKES: &[&str] = &["hyundai", "kia", "genesis", "daewoo", "ssangyong"];

static REGION_LISTS: &[(Region, &[&str])] = &[
    (Region::Japanese, JAPANESE_MAKES),
    (Region::European, EUROPEAN_MAKES),
    (Region::American, AMERICAN_MAKES),
    (Region::Korean, KOREAN_MAKES),
];

/// Case-insensitive lookup of `make` in the brand lists. Unlisted makes are `Other`.
pub fn categorize_make_to_region(make: &str) -> Region {
    let make = make.trim().to_lowercase();
    REGION_LISTS
        .iter()
        .find(|(_, brands)| brands.contains(&make.as_str()))
        .map(|(region, _)| *region)
        .unwrap_or(Region::Other)
}
