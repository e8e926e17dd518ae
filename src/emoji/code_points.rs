//! Static name-to-code-point table for standard Unicode emoji
//!
//! Maps emoji display names to their Unicode code points as lowercase hex
//! strings (the wire form the reaction API expects, e.g. "1f44d").
//! The table ships with the library and is read-only.

use std::collections::HashMap;

/// Name/code-point pairs for the standard emoji set
static CODE_POINTS: &[(&str, &str)] = &[
    ("+1", "1f44d"),
    ("-1", "1f44e"),
    ("100", "1f4af"),
    ("airplane", "2708"),
    ("alarm_clock", "23f0"),
    ("alien", "1f47d"),
    ("anchor", "2693"),
    ("angel", "1f47c"),
    ("angry", "1f620"),
    ("anguished", "1f627"),
    ("apple", "1f34e"),
    ("art", "1f3a8"),
    ("astonished", "1f632"),
    ("avocado", "1f951"),
    ("balloon", "1f388"),
    ("banana", "1f34c"),
    ("bank", "1f3e6"),
    ("baseball", "26be"),
    ("basketball", "1f3c0"),
    ("battery", "1f50b"),
    ("bear", "1f43b"),
    ("bee", "1f41d"),
    ("beer", "1f37a"),
    ("beers", "1f37b"),
    ("bell", "1f514"),
    ("bike", "1f6b2"),
    ("bird", "1f426"),
    ("birthday", "1f382"),
    ("blue_heart", "1f499"),
    ("blush", "1f60a"),
    ("book", "1f4d6"),
    ("bookmark", "1f516"),
    ("books", "1f4da"),
    ("boom", "1f4a5"),
    ("bouquet", "1f490"),
    ("bowling", "1f3b3"),
    ("bread", "1f35e"),
    ("broken_heart", "1f494"),
    ("bug", "1f41b"),
    ("bulb", "1f4a1"),
    ("burrito", "1f32f"),
    ("bus", "1f68c"),
    ("butterfly", "1f98b"),
    ("cactus", "1f335"),
    ("cake", "1f370"),
    ("calendar", "1f4c5"),
    ("camera", "1f4f7"),
    ("candy", "1f36c"),
    ("car", "1f697"),
    ("cat", "1f431"),
    ("champagne", "1f37e"),
    ("cheese", "1f9c0"),
    ("cherries", "1f352"),
    ("cherry_blossom", "1f338"),
    ("chicken", "1f414"),
    ("chocolate_bar", "1f36b"),
    ("clap", "1f44f"),
    ("clipboard", "1f4cb"),
    ("cloud", "2601"),
    ("clown", "1f921"),
    ("cocktail", "1f378"),
    ("coffee", "2615"),
    ("cold_sweat", "1f630"),
    ("computer", "1f4bb"),
    ("confetti_ball", "1f38a"),
    ("confounded", "1f616"),
    ("confused", "1f615"),
    ("cookie", "1f36a"),
    ("corn", "1f33d"),
    ("cow", "1f42e"),
    ("crab", "1f980"),
    ("credit_card", "1f4b3"),
    ("crescent_moon", "1f319"),
    ("crown", "1f451"),
    ("cry", "1f622"),
    ("crystal_ball", "1f52e"),
    ("dart", "1f3af"),
    ("dash", "1f4a8"),
    ("disappointed", "1f61e"),
    ("dizzy", "1f4ab"),
    ("dizzy_face", "1f635"),
    ("dog", "1f436"),
    ("dollar", "1f4b5"),
    ("dolphin", "1f42c"),
    ("door", "1f6aa"),
    ("doughnut", "1f369"),
    ("dragon", "1f409"),
    ("droplet", "1f4a7"),
    ("duck", "1f986"),
    ("eagle", "1f985"),
    ("ear", "1f442"),
    ("eggplant", "1f346"),
    ("electric_plug", "1f50c"),
    ("email", "2709"),
    ("exclamation", "2757"),
    ("expressionless", "1f611"),
    ("eyes", "1f440"),
    ("fearful", "1f628"),
    ("fire", "1f525"),
    ("fish", "1f41f"),
    ("fist", "270a"),
    ("flushed", "1f633"),
    ("four_leaf_clover", "1f340"),
    ("fox", "1f98a"),
    ("frog", "1f438"),
    ("game_die", "1f3b2"),
    ("gear", "2699"),
    ("gem", "1f48e"),
    ("ghost", "1f47b"),
    ("gift", "1f381"),
    ("gift_heart", "1f49d"),
    ("golf", "26f3"),
    ("grapes", "1f347"),
    ("green_heart", "1f49a"),
    ("grimacing", "1f62c"),
    ("grin", "1f601"),
    ("grinning", "1f600"),
    ("guitar", "1f3b8"),
    ("hamburger", "1f354"),
    ("hammer", "1f528"),
    ("hamster", "1f439"),
    ("headphones", "1f3a7"),
    ("hear_no_evil", "1f649"),
    ("heart", "2764"),
    ("heart_eyes", "1f60d"),
    ("heartbeat", "1f493"),
    ("heartpulse", "1f497"),
    ("horse", "1f434"),
    ("hospital", "1f3e5"),
    ("hot_pepper", "1f336"),
    ("hourglass", "231b"),
    ("house", "1f3e0"),
    ("hushed", "1f62f"),
    ("innocent", "1f607"),
    ("iphone", "1f4f1"),
    ("joy", "1f602"),
    ("key", "1f511"),
    ("kissing", "1f617"),
    ("kissing_heart", "1f618"),
    ("koala", "1f428"),
    ("laughing", "1f606"),
    ("lemon", "1f34b"),
    ("lion", "1f981"),
    ("lock", "1f512"),
    ("loudspeaker", "1f4e2"),
    ("maple_leaf", "1f341"),
    ("mask", "1f637"),
    ("mega", "1f4e3"),
    ("memo", "1f4dd"),
    ("microphone", "1f3a4"),
    ("moneybag", "1f4b0"),
    ("monkey", "1f412"),
    ("monkey_face", "1f435"),
    ("mouse", "1f42d"),
    ("muscle", "1f4aa"),
    ("mushroom", "1f344"),
    ("musical_note", "1f3b5"),
    ("nerd", "1f913"),
    ("neutral_face", "1f610"),
    ("newspaper", "1f4f0"),
    ("no_entry", "26d4"),
    ("notes", "1f3b6"),
    ("ocean", "1f30a"),
    ("octopus", "1f419"),
    ("office", "1f3e2"),
    ("ok_hand", "1f44c"),
    ("open_hands", "1f450"),
    ("open_mouth", "1f62e"),
    ("owl", "1f989"),
    ("package", "1f4e6"),
    ("palm_tree", "1f334"),
    ("panda", "1f43c"),
    ("paperclip", "1f4ce"),
    ("peach", "1f351"),
    ("penguin", "1f427"),
    ("pensive", "1f614"),
    ("persevere", "1f623"),
    ("pig", "1f437"),
    ("pineapple", "1f34d"),
    ("pizza", "1f355"),
    ("point_down", "1f447"),
    ("point_left", "1f448"),
    ("point_right", "1f449"),
    ("point_up", "261d"),
    ("poop", "1f4a9"),
    ("popcorn", "1f37f"),
    ("pray", "1f64f"),
    ("punch", "1f44a"),
    ("pushpin", "1f4cc"),
    ("question", "2753"),
    ("rabbit", "1f430"),
    ("rage", "1f621"),
    ("rainbow", "1f308"),
    ("raised_hand", "270b"),
    ("raised_hands", "1f64c"),
    ("ramen", "1f35c"),
    ("relieved", "1f60c"),
    ("ring", "1f48d"),
    ("robot", "1f916"),
    ("rocket", "1f680"),
    ("rolling_eyes", "1f644"),
    ("rose", "1f339"),
    ("santa", "1f385"),
    ("school", "1f3eb"),
    ("scissors", "2702"),
    ("scream", "1f631"),
    ("scroll", "1f4dc"),
    ("see_no_evil", "1f648"),
    ("seedling", "1f331"),
    ("ship", "1f6a2"),
    ("sleeping", "1f634"),
    ("sleepy", "1f62a"),
    ("slight_frown", "1f641"),
    ("slight_smile", "1f642"),
    ("smile", "1f604"),
    ("smiley", "1f603"),
    ("smirk", "1f60f"),
    ("snail", "1f40c"),
    ("snake", "1f40d"),
    ("snowflake", "2744"),
    ("sob", "1f62d"),
    ("soccer", "26bd"),
    ("sparkles", "2728"),
    ("sparkling_heart", "1f496"),
    ("speak_no_evil", "1f64a"),
    ("speech_balloon", "1f4ac"),
    ("star", "2b50"),
    ("star2", "1f31f"),
    ("strawberry", "1f353"),
    ("stuck_out_tongue", "1f61b"),
    ("stuck_out_tongue_wink", "1f61c"),
    ("sunflower", "1f33b"),
    ("sunglasses", "1f60e"),
    ("sushi", "1f363"),
    ("sweat_drops", "1f4a6"),
    ("sweat_smile", "1f605"),
    ("taco", "1f32e"),
    ("tada", "1f389"),
    ("tea", "1f375"),
    ("tennis", "1f3be"),
    ("tent", "26fa"),
    ("thinking", "1f914"),
    ("thought_balloon", "1f4ad"),
    ("tiger", "1f42f"),
    ("tired_face", "1f62b"),
    ("tongue", "1f445"),
    ("trophy", "1f3c6"),
    ("tulip", "1f337"),
    ("turtle", "1f422"),
    ("tv", "1f4fa"),
    ("two_hearts", "1f495"),
    ("umbrella", "2614"),
    ("unamused", "1f612"),
    ("unicorn", "1f984"),
    ("unlock", "1f513"),
    ("v", "270c"),
    ("video_game", "1f3ae"),
    ("warning", "26a0"),
    ("watch", "231a"),
    ("watermelon", "1f349"),
    ("wave", "1f44b"),
    ("weary", "1f629"),
    ("whale", "1f433"),
    ("white_check_mark", "2705"),
    ("wine_glass", "1f377"),
    ("wink", "1f609"),
    ("worried", "1f61f"),
    ("wrench", "1f527"),
    ("x", "274c"),
    ("yellow_heart", "1f49b"),
    ("yum", "1f60b"),
    ("zap", "26a1"),
    ("zipper_mouth", "1f910"),
    ("zzz", "1f4a4"),
];

lazy_static::lazy_static! {
    /// Lookup map built once from the static table
    static ref CODE_POINT_MAP: HashMap<&'static str, &'static str> =
        CODE_POINTS.iter().copied().collect();
}

/// Look up the Unicode code point for a standard emoji name
pub fn code_point(name: &str) -> Option<&'static str> {
    CODE_POINT_MAP.get(name).copied()
}

/// Iterate over all standard emoji names
pub fn names() -> impl Iterator<Item = &'static str> {
    CODE_POINTS.iter().map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(code_point("+1"), Some("1f44d"));
        assert_eq!(code_point("octopus"), Some("1f419"));
        assert_eq!(code_point("not_an_emoji"), None);
    }

    #[test]
    fn test_names_unique() {
        let mut seen = std::collections::HashSet::new();
        for name in names() {
            assert!(seen.insert(name), "duplicate entry: {name}");
        }
    }

    #[test]
    fn test_code_points_are_hex() {
        for (name, code) in CODE_POINTS {
            assert!(
                u32::from_str_radix(code, 16).is_ok(),
                "bad code point for {name}: {code}"
            );
        }
    }
}
