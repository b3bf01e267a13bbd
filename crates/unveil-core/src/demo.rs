//! Built-in demo scripts.
//!
//! Two variants of the same farewell-gift story ship with the crate. They
//! share one stage sequence, one set of media slots, and one playlist
//! shape; everything variant-specific — wording, gate secrets, hints —
//! lives in a single `Wording` table so the sequence is written once.

use crate::ambient::AmbientSpec;
use crate::error::{ScriptError, ScriptResult};
use crate::gate::{GateSpec, MatchMode};
use crate::media::MediaSpec;
use crate::script::{Script, ScriptMeta};
use crate::stage::{Advance, Stage};

/// Names accepted by [`variant`].
pub const VARIANT_NAMES: [&str; 2] = ["one", "two"];

struct Wording {
    title: &'static str,
    author: &'static str,
    welcome: &'static str,
    first_door: &'static str,
    first_secret: &'static str,
    first_mode: MatchMode,
    first_hint: &'static str,
    opening: &'static str,
    first_film: &'static str,
    first_photo: &'static str,
    first_photo_caption: &'static str,
    photo_story: &'static str,
    second_door: &'static str,
    second_secret: &'static str,
    second_mode: MatchMode,
    second_hint: &'static str,
    keepsake_one_note: &'static str,
    third_door: &'static str,
    third_secret: &'static str,
    third_mode: MatchMode,
    third_hint: &'static str,
    keepsake_two_note: &'static str,
    looking_back: &'static str,
    almost_there: &'static str,
    behind_the_scenes: &'static str,
    the_work: &'static str,
    hold_on: &'static str,
    button_label: &'static str,
    farewell: &'static str,
}

const ONE: Wording = Wording {
    title: "A Farewell Gift",
    author: "a friend",
    welcome: "The moment has finally come. Everything I have been quietly \
              building for weeks is waiting behind this page.\nAre you ready \
              for your farewell gift?\n\nFirst, write the password.\nCheck \
              the end of the letter.",
    first_door: "Type the password to continue.",
    first_secret: "I'll not be anxious anymore",
    first_mode: MatchMode::Exact,
    first_hint: "The last line of the letter.",
    opening: "You are probably wondering what all this is.\nA fair question, \
              and maybe a few more are forming right now.\nDo not worry. \
              Everything will make sense by the end.",
    first_film: "Let's watch a short film first.\nPress play when you are \
                 ready.",
    first_photo: "This is where the story starts.\nWe never took many photos \
                  together, but the few we have are enough.\nHere is the \
                  first one.",
    first_photo_caption: "The day we first met.",
    photo_story: "I still remember the exhibition group where you first \
                  shared your sketches.\nI had never seen anyone draw like \
                  that, and I never told you how much it pushed me to start \
                  drawing myself.\n\nFunny, isn't it. At the beginning I did \
                  not even know your name.\nThen came the questions, one \
                  after another.\nDo you have last year's papers?\nCould you \
                  explain this one thing?\nAre you coming tomorrow?\n\n\
                  Somewhere between all those small questions we became \
                  friends.\nCompetitions, exhibitions, shared lunches, gift \
                  shopping for other people's birthdays.\nAnd now here we \
                  are.\n\nLet's have a little fun before the serious part.\n\
                  Type the next password when it appears.",
    second_door: "Your favourite anime's main character.\nType the password.",
    second_secret: "Shoyo Hinata",
    second_mode: MatchMode::Exact,
    second_hint: "Number ten, the small giant.",
    keepsake_one_note: "Got you. I knew you would smile at this one.\nCredit \
                        goes to a friend for catching the moment on camera.",
    third_door: "One more. Another hidden surprise awaits.\nType the \
                 password.",
    third_secret: "password",
    third_mode: MatchMode::Exact,
    third_hint: "The most forbidden password of all.",
    keepsake_two_note: "This one you never saw coming.\nEver since you gave \
                        me that letter, I have been saving these for \
                        today.\n\nBack to the story.\nThere was one sentence \
                        you said, months ago, that made me decide this gift \
                        had to be the best one I ever made.",
    looking_back: "I could list a hundred small moments and make us both \
                   emotional,\nso let us step out of the past instead.\n\n\
                   But first, one small gift. Watch.",
    almost_there: "Good so far? I hoped so.\nPutting this together meant \
                   scrolling back through months of our conversations.\nI am \
                   glad it was you I shared all of it with.",
    behind_the_scenes: "Since this page is nearly over, let me show off a \
                        little.\nHere is what it took to build it for you. \
                        Watch closely.",
    the_work: "See? A lot of work went into your gift.\nI could have pasted \
               everything into some template site, but they all want \
               subscriptions, and honestly I wanted to build it myself.\nIt \
               broke more times than I can count. Pieces moved, pieces \
               vanished, one platform shut down halfway through.\nBut it is \
               here now, finished, for you.\n\nHope you really like it.\nI \
               am going to miss you very, very much.",
    hold_on: "Wait, wait. Where do you think you are going?\nThere is one \
              more gift. Look before you leave.",
    button_label: "Open the hidden gift",
    farewell: "One gift, many surprises. That was the plan all along.\n\
               Thanks again to the friend who filmed the last one.\n\nMaking \
               this used up the last of my composure, so before the tears \
               win:\n\nRemember you must die, so remember to live.\nTake \
               care of yourself.\n\nGoodbye, my friend. Love you 3000.\n\n\
               THE END",
};

const TWO: Wording = Wording {
    title: "The Send-Off",
    author: "the one who stayed late",
    welcome: "Tonight is the night. I promised you a proper send-off, and a \
              promise is a promise.\nReady to see what I made for you?\n\n\
              You will need the first password.\nIt is the last line of the \
              card.",
    first_door: "Type the password to continue.",
    first_secret: "The adventure continues",
    first_mode: MatchMode::Exact,
    first_hint: "The last line of the card.",
    opening: "By now you are wondering why a simple goodbye needs a \
              password.\nBecause this is not a simple goodbye.\nStay with \
              me.",
    first_film: "A short film to begin with.\nPress play whenever you are \
                 ready.",
    first_photo: "We started in the same tiny office with one broken \
                  chair.\nHere is the oldest photo I could find.",
    first_photo_caption: "Day one, broken chair and all.",
    photo_story: "Remember the first review you survived?\nYou walked in \
                  convinced you would be torn apart, and walked out having \
                  taught the room something.\nThat became a pattern.\n\n\
                  Every project after that had the same shape.\nA slow \
                  start, a mountain in the middle, and you, stubbornly \
                  refusing to stop.\n\nEnough sentiment. Let's play a little \
                  first.\nNext password, coming up.",
    second_door: "The star that never moves.\nType the password.",
    second_secret: "Polaris",
    second_mode: MatchMode::IgnoreCase,
    second_hint: "Look north.",
    keepsake_one_note: "There it is. The whiteboard from the night \
                        everything finally worked.\nNobody wanted to erase \
                        it, so I photographed it instead.",
    third_door: "Last one. One more surprise behind it.\nType the password.",
    third_secret: "backstage",
    third_mode: MatchMode::Exact,
    third_hint: "Where the real work happens.",
    keepsake_two_note: "Caught you mid-laugh. It took weeks to get that shot \
                        without you noticing.\n\nBack to the story.\nWhen \
                        you told me this chapter was ending, I decided the \
                        farewell had to match everything you gave this \
                        place.",
    looking_back: "I could walk through every milestone and ruin us both,\n\
                   so let us skip ahead instead.\n\nFirst, though, one small \
                   detour. Watch.",
    almost_there: "Still with me? Good.\nBuilding this meant digging through \
                   years of shared notes.\nIt was the best kind of \
                   archaeology.",
    behind_the_scenes: "Before we close, a look behind the curtain.\nThis is \
                        what it took to put your send-off together.",
    the_work: "All of that, for one page.\nWorth every late evening.\n\n\
               Wherever you land next, they are lucky to have you.\nDo not \
               forget the broken chair.",
    hold_on: "Hold on. Not so fast.\nOne more thing before you go.",
    button_label: "Open the last gift",
    farewell: "That is the whole show. One goodbye, many detours.\n\nKeep \
               the card. Keep the photos. Keep going.\n\nThe adventure \
               continues.\n\nTHE END",
};

fn build(w: &Wording) -> Script {
    let mut script = Script::new(ScriptMeta::new(w.title));
    script.meta.author = w.author.to_string();

    script.stages = vec![
        Stage::new(
            "welcome",
            "welcome-text",
            w.welcome,
            Advance::AfterText { pause_ms: 1500 },
        ),
        Stage::new(
            "first-door",
            "first-door-text",
            w.first_door,
            Advance::OnGate { pause_ms: 0 },
        )
        .with_gate("first-door"),
        Stage::new(
            "opening",
            "opening-text",
            w.opening,
            Advance::AfterText { pause_ms: 2000 },
        ),
        Stage::new(
            "first-film",
            "first-film-text",
            w.first_film,
            Advance::AfterMedia {
                pause_ms: 3000,
                ceiling_ms: Some(15_000),
            },
        )
        .with_media("first-film")
        .with_media_delay(2000),
        Stage::new(
            "first-photo",
            "first-photo-text",
            w.first_photo,
            Advance::AfterMedia {
                pause_ms: 0,
                ceiling_ms: Some(2000),
            },
        )
        .with_media("meeting-photo")
        .with_media_delay(1500),
        Stage::new(
            "photo-story",
            "photo-story-text",
            w.photo_story,
            Advance::AfterText { pause_ms: 3000 },
        ),
        // Placeholder step kept from an earlier cut of the story; it
        // completes instantly and flows straight on.
        Stage::new(
            "interlude",
            "interlude-text",
            "",
            Advance::AfterText { pause_ms: 0 },
        ),
        Stage::new(
            "second-door",
            "second-door-text",
            w.second_door,
            Advance::OnGate { pause_ms: 1000 },
        )
        .with_gate("second-door"),
        Stage::new(
            "keepsake-one",
            "keepsake-one-text",
            "",
            Advance::AfterMedia {
                pause_ms: 0,
                ceiling_ms: Some(3000),
            },
        )
        .with_media("keepsake-one"),
        Stage::new(
            "keepsake-one-note",
            "keepsake-one-note-text",
            w.keepsake_one_note,
            Advance::AfterText { pause_ms: 3000 },
        ),
        Stage::new(
            "third-door",
            "third-door-text",
            w.third_door,
            Advance::OnGate { pause_ms: 1000 },
        )
        .with_gate("third-door"),
        Stage::new(
            "keepsake-two",
            "keepsake-two-text",
            "",
            Advance::AfterMedia {
                pause_ms: 0,
                ceiling_ms: Some(3000),
            },
        )
        .with_media("keepsake-two"),
        Stage::new(
            "keepsake-two-note",
            "keepsake-two-note-text",
            w.keepsake_two_note,
            Advance::AfterText { pause_ms: 3000 },
        ),
        Stage::new(
            "looking-back",
            "looking-back-text",
            w.looking_back,
            Advance::AfterMedia {
                pause_ms: 3000,
                ceiling_ms: Some(12_000),
            },
        )
        .with_media("every-moment")
        .with_enter_delay(2500)
        .with_media_delay(3000),
        Stage::new(
            "almost-there",
            "almost-there-text",
            w.almost_there,
            Advance::AfterText { pause_ms: 2000 },
        ),
        Stage::new(
            "behind-the-scenes",
            "behind-the-scenes-text",
            w.behind_the_scenes,
            Advance::AfterMedia {
                pause_ms: 3000,
                ceiling_ms: Some(15_000),
            },
        )
        .with_media("making-of")
        .with_media_delay(3000),
        Stage::new(
            "the-work",
            "the-work-text",
            w.the_work,
            Advance::AfterText { pause_ms: 3000 },
        ),
        Stage::new(
            "hold-on",
            "hold-on-text",
            w.hold_on,
            Advance::AfterText { pause_ms: 3000 },
        ),
        Stage::new(
            "gift-offer",
            "gift-offer-text",
            "",
            Advance::OnButton {
                label: w.button_label.to_string(),
            },
        ),
        // The last film has no ceiling: the story waits for it to be
        // watched to the end.
        Stage::new(
            "surprise",
            "surprise-text",
            "",
            Advance::AfterMedia {
                pause_ms: 3000,
                ceiling_ms: None,
            },
        )
        .with_media("surprise-film"),
        Stage::new("farewell", "farewell-text", w.farewell, Advance::End),
    ];

    script.gates = vec![
        GateSpec::with_secret("first-door", w.first_secret)
            .with_match_mode(w.first_mode)
            .with_hint(w.first_hint),
        GateSpec::with_secret("second-door", w.second_secret)
            .with_match_mode(w.second_mode)
            .with_hint(w.second_hint),
        GateSpec::with_secret("third-door", w.third_secret)
            .with_match_mode(w.third_mode)
            .with_hint(w.third_hint),
    ];

    script.media = vec![
        MediaSpec::video("first-film", "media/first-film.mp4", 12_000),
        MediaSpec::photo("meeting-photo", "media/meeting.jpg")
            .with_caption(w.first_photo_caption),
        MediaSpec::photo("keepsake-one", "media/keepsake-one.jpg"),
        MediaSpec::photo("keepsake-two", "media/keepsake-two.jpg"),
        MediaSpec::video("every-moment", "media/every-moment.mp4", 20_000),
        MediaSpec::video("making-of", "media/making-of.mp4", 45_000),
        MediaSpec::video("surprise-film", "media/surprise.mp4", 18_000),
    ];

    script.ambient = AmbientSpec::new(
        (1..=6).map(|n| format!("ambient-{n:02}")).collect(),
    );

    script
}

/// The first built-in variant of the farewell story.
pub fn variant_one() -> Script {
    build(&ONE)
}

/// The second built-in variant, with different wording and secrets.
pub fn variant_two() -> Script {
    build(&TWO)
}

/// Look up a built-in variant by name.
pub fn variant(name: &str) -> ScriptResult<Script> {
    match name {
        "one" => Ok(variant_one()),
        "two" => Ok(variant_two()),
        other => Err(ScriptError::UnknownVariant(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::StageId;

    #[test]
    fn both_variants_validate_clean() {
        assert!(variant_one().validate().is_empty());
        assert!(variant_two().validate().is_empty());
    }

    #[test]
    fn variant_lookup_by_name() {
        assert!(variant("one").is_ok());
        assert!(variant("two").is_ok());
        let err = variant("three").unwrap_err();
        assert!(err.to_string().contains("three"));
    }

    #[test]
    fn sequence_starts_at_welcome_and_ends_terminal() {
        let script = variant_one();
        assert_eq!(script.stages[0].id, StageId::new("welcome"));
        assert!(script.stages.last().unwrap().advance.is_end());
        assert_eq!(script.stage_count(), 21);
    }

    #[test]
    fn first_gate_accepts_the_letter_line() {
        let script = variant_one();
        let gate = script.get_gate(&"first-door".into()).unwrap();
        assert!(gate.accepts("  I'll not be anxious anymore  "));
        assert!(!gate.accepts("i'll not be anxious anymore"));
    }

    #[test]
    fn variant_two_has_one_case_insensitive_gate() {
        let script = variant_two();
        let insensitive = script
            .gates
            .iter()
            .filter(|g| g.match_mode == MatchMode::IgnoreCase)
            .count();
        assert_eq!(insensitive, 1);
        let gate = script.get_gate(&"second-door".into()).unwrap();
        assert!(gate.accepts("polaris"));
        assert!(gate.accepts("POLARIS"));
    }

    #[test]
    fn surprise_film_waits_for_its_ending() {
        let script = variant_one();
        let surprise = script.get_stage(&StageId::new("surprise")).unwrap();
        assert_eq!(
            surprise.advance,
            Advance::AfterMedia {
                pause_ms: 3000,
                ceiling_ms: None,
            }
        );
    }

    #[test]
    fn playlist_has_six_tracks_at_default_volume() {
        let script = variant_one();
        assert_eq!(script.ambient.len(), 6);
        assert_eq!(script.ambient.volume, 30);
    }

    #[test]
    fn interlude_is_an_empty_instant_stage() {
        let script = variant_two();
        let interlude = script.get_stage(&StageId::new("interlude")).unwrap();
        assert!(interlude.text.is_empty());
        assert_eq!(interlude.advance, Advance::AfterText { pause_ms: 0 });
    }
}
