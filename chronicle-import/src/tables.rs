//! Static lookup tables for name and place matching
//!
//! All tables are immutable. Keys are lowercase; values are canonical display
//! forms. Source lists keep their declaration order so nickname alternatives
//! come out in a stable order.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Canonical first names and their common nicknames, in preference order
const NICKNAME_LIST: &[(&str, &[&str])] = &[
    ("william", &["bill", "will", "billy", "willy"]),
    ("robert", &["bob", "rob", "bobby", "robbie"]),
    ("richard", &["dick", "rick", "rich", "ricky"]),
    ("james", &["jim", "jimmy", "jamie"]),
    ("john", &["jack", "johnny"]),
    ("elizabeth", &["liz", "beth", "betty", "lizzie", "eliza"]),
    ("margaret", &["maggie", "meg", "peggy", "margie"]),
    ("catherine", &["kate", "cathy", "kitty"]),
    ("katherine", &["kate", "kathy", "katie"]),
    ("charles", &["charlie", "chuck"]),
    ("edward", &["ed", "eddie", "ted", "ned"]),
    ("thomas", &["tom", "tommy"]),
    ("joseph", &["joe", "joey"]),
    ("michael", &["mike", "mick", "mickey"]),
    ("henry", &["harry", "hank", "hal"]),
    ("alexander", &["alex", "sandy"]),
    ("ann", &["annie", "nan", "nancy"]),
    ("mary", &["polly", "molly", "mae"]),
    ("frederick", &["fred", "freddie", "fritz"]),
    ("johann", &["hans"]),
    ("benjamin", &["ben", "benny"]),
    ("samuel", &["sam", "sammy"]),
    ("daniel", &["dan", "danny"]),
    ("david", &["dave", "davy"]),
    ("patricia", &["pat", "patty", "trish"]),
    ("dorothy", &["dot", "dolly"]),
    ("susan", &["sue", "susie"]),
    ("theodore", &["ted", "teddy", "theo"]),
    ("nicholas", &["nick", "nicky"]),
    ("anthony", &["tony"]),
    ("lawrence", &["larry"]),
    ("albert", &["al", "bert"]),
    ("francis", &["frank", "fran"]),
    ("christopher", &["chris", "kit"]),
    ("abigail", &["abby"]),
    ("sarah", &["sally", "sadie"]),
];

/// Common place abbreviations
const PLACE_ABBREVIATIONS: &[(&str, &str)] = &[
    ("nyc", "New York City"),
    ("ny", "New York"),
    ("la", "Los Angeles"),
    ("sf", "San Francisco"),
    ("dc", "Washington, D.C."),
    ("washington dc", "Washington, D.C."),
    ("stl", "St. Louis"),
    ("philly", "Philadelphia"),
    ("nola", "New Orleans"),
    ("uk", "United Kingdom"),
    ("gb", "United Kingdom"),
    ("us", "United States"),
    ("usa", "United States"),
    ("ussr", "Soviet Union"),
    ("ddr", "East Germany"),
    ("gdr", "East Germany"),
    ("frg", "West Germany"),
];

/// Historical place names and their modern equivalents
const HISTORICAL_NAMES: &[(&str, &str)] = &[
    ("constantinople", "Istanbul"),
    ("byzantium", "Istanbul"),
    ("petrograd", "Saint Petersburg"),
    ("leningrad", "Saint Petersburg"),
    ("stalingrad", "Volgograd"),
    ("tsaritsyn", "Volgograd"),
    ("königsberg", "Kaliningrad"),
    ("konigsberg", "Kaliningrad"),
    ("danzig", "Gdańsk"),
    ("breslau", "Wrocław"),
    ("lemberg", "Lviv"),
    ("pressburg", "Bratislava"),
    ("christiania", "Oslo"),
    ("bombay", "Mumbai"),
    ("madras", "Chennai"),
    ("calcutta", "Kolkata"),
    ("peking", "Beijing"),
    ("canton", "Guangzhou"),
    ("saigon", "Ho Chi Minh City"),
    ("edo", "Tokyo"),
    ("batavia", "Jakarta"),
    ("new amsterdam", "New York City"),
    ("salisbury", "Harare"),
    ("léopoldville", "Kinshasa"),
    ("leopoldville", "Kinshasa"),
    ("ceylon", "Sri Lanka"),
    ("persia", "Iran"),
    ("siam", "Thailand"),
];

/// Native-language place names and their English forms
const LANGUAGE_VARIATIONS: &[(&str, &str)] = &[
    ("münchen", "Munich"),
    ("muenchen", "Munich"),
    ("köln", "Cologne"),
    ("koeln", "Cologne"),
    ("nürnberg", "Nuremberg"),
    ("nuernberg", "Nuremberg"),
    ("wien", "Vienna"),
    ("praha", "Prague"),
    ("roma", "Rome"),
    ("firenze", "Florence"),
    ("venezia", "Venice"),
    ("milano", "Milan"),
    ("napoli", "Naples"),
    ("torino", "Turin"),
    ("lisboa", "Lisbon"),
    ("sevilla", "Seville"),
    ("moskva", "Moscow"),
    ("warszawa", "Warsaw"),
    ("kraków", "Krakow"),
    ("den haag", "The Hague"),
    ("bruxelles", "Brussels"),
    ("brussel", "Brussels"),
    ("genève", "Geneva"),
    ("geneve", "Geneva"),
    ("københavn", "Copenhagen"),
    ("göteborg", "Gothenburg"),
    ("athina", "Athens"),
    ("beograd", "Belgrade"),
];

/// Coordinates (lat, lng) of canonical place names
const GAZETTEER: &[(&str, f64, f64)] = &[
    ("New York City", 40.7128, -74.0060),
    ("Los Angeles", 34.0522, -118.2437),
    ("San Francisco", 37.7749, -122.4194),
    ("Washington, D.C.", 38.9072, -77.0369),
    ("Philadelphia", 39.9526, -75.1652),
    ("New Orleans", 29.9511, -90.0715),
    ("St. Louis", 38.6270, -90.1994),
    ("Istanbul", 41.0082, 28.9784),
    ("Saint Petersburg", 59.9311, 30.3609),
    ("Volgograd", 48.7080, 44.5133),
    ("Kaliningrad", 54.7104, 20.4522),
    ("Gdańsk", 54.3520, 18.6466),
    ("Wrocław", 51.1079, 17.0385),
    ("Lviv", 49.8397, 24.0297),
    ("Bratislava", 48.1486, 17.1077),
    ("Oslo", 59.9139, 10.7522),
    ("Mumbai", 19.0760, 72.8777),
    ("Chennai", 13.0827, 80.2707),
    ("Kolkata", 22.5726, 88.3639),
    ("Beijing", 39.9042, 116.4074),
    ("Guangzhou", 23.1291, 113.2644),
    ("Ho Chi Minh City", 10.8231, 106.6297),
    ("Tokyo", 35.6762, 139.6503),
    ("Jakarta", -6.2088, 106.8456),
    ("Harare", -17.8252, 31.0335),
    ("Kinshasa", -4.4419, 15.2663),
    ("Munich", 48.1351, 11.5820),
    ("Cologne", 50.9375, 6.9603),
    ("Nuremberg", 49.4521, 11.0767),
    ("Vienna", 48.2082, 16.3738),
    ("Prague", 50.0755, 14.4378),
    ("Rome", 41.9028, 12.4964),
    ("Florence", 43.7696, 11.2558),
    ("Venice", 45.4408, 12.3155),
    ("Milan", 45.4642, 9.1900),
    ("Naples", 40.8518, 14.2681),
    ("Turin", 45.0703, 7.6869),
    ("Lisbon", 38.7223, -9.1393),
    ("Seville", 37.3891, -5.9845),
    ("Moscow", 55.7558, 37.6173),
    ("Warsaw", 52.2297, 21.0122),
    ("Krakow", 50.0647, 19.9450),
    ("The Hague", 52.0705, 4.3007),
    ("Brussels", 50.8503, 4.3517),
    ("Geneva", 46.2044, 6.1432),
    ("Copenhagen", 55.6761, 12.5683),
    ("Gothenburg", 57.7089, 11.9746),
    ("Athens", 37.9838, 23.7275),
    ("Belgrade", 44.7866, 20.4489),
    ("Berlin", 52.5200, 13.4050),
    ("Paris", 48.8566, 2.3522),
    ("London", 51.5074, -0.1278),
];

/// Canonical name → nicknames
pub static NICKNAMES: Lazy<HashMap<&'static str, &'static [&'static str]>> =
    Lazy::new(|| NICKNAME_LIST.iter().copied().collect());

/// Nickname → canonical names (a nickname may belong to several, e.g. "kate")
pub static CANONICAL_NAMES: Lazy<HashMap<&'static str, Vec<&'static str>>> = Lazy::new(|| {
    let mut map: HashMap<&'static str, Vec<&'static str>> = HashMap::new();
    for (canonical, nicknames) in NICKNAME_LIST {
        for nickname in nicknames.iter() {
            map.entry(*nickname).or_default().push(*canonical);
        }
    }
    map
});

pub static ABBREVIATIONS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| PLACE_ABBREVIATIONS.iter().copied().collect());

pub static HISTORICAL: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| HISTORICAL_NAMES.iter().copied().collect());

pub static LANGUAGE: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| LANGUAGE_VARIATIONS.iter().copied().collect());

/// Keyed by lowercase canonical name
pub static COORDINATES: Lazy<HashMap<String, (f64, f64)>> = Lazy::new(|| {
    GAZETTEER
        .iter()
        .map(|(name, lat, lng)| (name.to_lowercase(), (*lat, *lng)))
        .collect()
});

/// True if `a` and `b` are a canonical name and one of its nicknames, in either order
///
/// Both inputs must already be lowercase and trimmed.
pub fn is_nickname_pair(a: &str, b: &str) -> bool {
    let listed = |canonical: &str, nickname: &str| {
        NICKNAMES
            .get(canonical)
            .is_some_and(|nicknames| nicknames.contains(&nickname))
    };
    listed(a, b) || listed(b, a)
}
