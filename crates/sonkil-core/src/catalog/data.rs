//! Built-in catalog tables.
//!
//! Points other than the five classic hand points use their hand
//! correspondence location (Korean hand therapy maps the body onto the hand),
//! so every point can be pressed on the hand.

use super::{AcupressurePoint, Category, Hand, Position, Pressure, Side, Symptom};

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn symptom(id: &str, name: &str, category: Category, icon: &str, related: &[&str]) -> Symptom {
    Symptom {
        id: id.into(),
        name: name.into(),
        category,
        icon: icon.into(),
        related_points: ids(related),
    }
}

#[allow(clippy::too_many_arguments)]
fn point(
    id: &str,
    name: &str,
    localized_name: &str,
    (x, y): (f32, f32),
    side: Side,
    symptoms: &[&str],
    description: &str,
    method: &str,
    duration_secs: u32,
    pressure: Pressure,
) -> AcupressurePoint {
    AcupressurePoint {
        id: id.into(),
        name: name.into(),
        localized_name: localized_name.into(),
        position: Position { x, y },
        hand: Hand::Right,
        side,
        symptoms: ids(symptoms),
        description: description.into(),
        method: method.into(),
        duration_secs,
        pressure,
    }
}

pub(super) fn symptoms() -> Vec<Symptom> {
    use Category::*;
    vec![
        symptom("headache", "Headache", HeadFace, "🤕", &["hegu", "yintang", "taiyang"]),
        symptom("eye-fatigue", "Eye fatigue", HeadFace, "👁️", &["jingming", "sibai", "hegu"]),
        symptom("nasal-congestion", "Nasal congestion", HeadFace, "😤", &["yingxiang", "hegu"]),
        symptom("jaw-tension", "Jaw tension", HeadFace, "😬", &["jiache", "xiaguan"]),
        symptom("neck-stiffness", "Stiff neck", NeckShoulder, "🦴", &["houxi", "lieque"]),
        symptom("shoulder-tension", "Shoulder tension", NeckShoulder, "💪", &["jianzhongshu", "hegu"]),
        symptom("chest-tightness", "Chest tightness", ChestAbdomen, "💓", &["neiguan", "shanzhong"]),
        symptom("heartburn", "Heartburn", ChestAbdomen, "🔥", &["neiguan", "zusanli"]),
        symptom("indigestion", "Indigestion", ChestAbdomen, "🤢", &["neiguan", "zhongwan", "zusanli"]),
        symptom("bloating", "Bloating", ChestAbdomen, "🫃", &["tianshu", "qihai"]),
        symptom("fatigue", "General fatigue", General, "😴", &["baihui", "yongquan", "hegu"]),
        symptom("stress", "Stress", General, "😰", &["shenmen", "yintang", "neiguan"]),
        symptom("insomnia", "Insomnia", General, "🌙", &["shenmen", "yintang", "anmian"]),
    ]
}

pub(super) fn points() -> Vec<AcupressurePoint> {
    use Pressure::*;
    use Side::*;
    vec![
        point(
            "hegu",
            "Hegu",
            "합곡혈",
            (25.0, 35.0),
            Back,
            &["headache", "eye-fatigue", "nasal-congestion", "shoulder-tension", "fatigue"],
            "The hollow between the thumb and index finger",
            "Press gently with the thumb in small circles",
            60,
            Medium,
        ),
        point(
            "neiguan",
            "Neiguan",
            "내관혈",
            (50.0, 75.0),
            Palm,
            &["chest-tightness", "heartburn", "indigestion", "stress"],
            "Three finger-widths up the forearm from the wrist crease",
            "Press deeply with the thumb, hold for five seconds, then release",
            45,
            Firm,
        ),
        point(
            "shenmen",
            "Shenmen",
            "신문혈",
            (15.0, 80.0),
            Palm,
            &["stress", "insomnia", "fatigue"],
            "The hollow at the little-finger end of the wrist crease",
            "Massage lightly in circles",
            30,
            Light,
        ),
        point(
            "houxi",
            "Houxi",
            "후계혈",
            (85.0, 45.0),
            Back,
            &["neck-stiffness", "shoulder-tension"],
            "Outer edge of the hand below the little finger knuckle",
            "Press steadily with the thumb",
            45,
            Medium,
        ),
        point(
            "laogong",
            "Laogong",
            "노궁혈",
            (50.0, 50.0),
            Palm,
            &["fatigue", "stress", "chest-tightness"],
            "The centre of the palm",
            "Rub both palms together and knead the centre",
            60,
            Medium,
        ),
        point(
            "yintang",
            "Yintang",
            "인당혈",
            (50.0, 12.0),
            Back,
            &["headache", "stress", "insomnia"],
            "Middle finger, just above the first knuckle (brow-centre correspondence)",
            "Press lightly with a fingertip and breathe slowly",
            45,
            Light,
        ),
        point(
            "taiyang",
            "Taiyang",
            "태양혈",
            (42.0, 14.0),
            Back,
            &["headache"],
            "Both sides of the middle finger tip (temple correspondence)",
            "Pinch gently from both sides with thumb and index finger",
            30,
            Light,
        ),
        point(
            "jingming",
            "Jingming",
            "정명혈",
            (47.0, 8.0),
            Palm,
            &["eye-fatigue"],
            "Inner corners of the middle finger's first joint (eye correspondence)",
            "Press softly with the thumbnail edge",
            30,
            Light,
        ),
        point(
            "sibai",
            "Sibai",
            "사백혈",
            (53.0, 10.0),
            Palm,
            &["eye-fatigue"],
            "Just below the middle finger's first joint crease",
            "Press and release in a slow rhythm",
            30,
            Light,
        ),
        point(
            "yingxiang",
            "Yingxiang",
            "영향혈",
            (50.0, 18.0),
            Palm,
            &["nasal-congestion"],
            "Centre of the middle finger's second segment (nose correspondence)",
            "Rub up and down with the thumb",
            45,
            Medium,
        ),
        point(
            "jiache",
            "Jiache",
            "협거혈",
            (44.0, 22.0),
            Back,
            &["jaw-tension"],
            "Outer side of the middle finger's second joint (jaw correspondence)",
            "Press and circle slowly",
            45,
            Medium,
        ),
        point(
            "xiaguan",
            "Xiaguan",
            "하관혈",
            (56.0, 22.0),
            Back,
            &["jaw-tension"],
            "Inner side of the middle finger's second joint",
            "Press steadily while relaxing the jaw",
            45,
            Medium,
        ),
        point(
            "lieque",
            "Lieque",
            "열결혈",
            (22.0, 78.0),
            Palm,
            &["neck-stiffness"],
            "Thumb side of the wrist, above the bony bump",
            "Press with the index finger while turning the neck slowly",
            45,
            Medium,
        ),
        point(
            "jianzhongshu",
            "Jianzhongshu",
            "견중수혈",
            (62.0, 30.0),
            Back,
            &["shoulder-tension"],
            "Base of the ring finger on the back of the hand (shoulder correspondence)",
            "Knead firmly with the thumb",
            60,
            Firm,
        ),
        point(
            "shanzhong",
            "Shanzhong",
            "전중혈",
            (50.0, 40.0),
            Palm,
            &["chest-tightness"],
            "Palm midline just below the middle finger base (chest correspondence)",
            "Press lightly and breathe out slowly",
            45,
            Light,
        ),
        point(
            "zusanli",
            "Zusanli",
            "족삼리혈",
            (70.0, 55.0),
            Palm,
            &["heartburn", "indigestion"],
            "Ring finger side of the palm below the knuckle line",
            "Press firmly and knead",
            60,
            Firm,
        ),
        point(
            "zhongwan",
            "Zhongwan",
            "중완혈",
            (50.0, 58.0),
            Palm,
            &["indigestion"],
            "Palm midline halfway to the wrist (stomach correspondence)",
            "Press in slow clockwise circles",
            60,
            Medium,
        ),
        point(
            "tianshu",
            "Tianshu",
            "천추혈",
            (40.0, 62.0),
            Palm,
            &["bloating"],
            "Either side of the palm midline below the centre",
            "Press both sides alternately",
            45,
            Medium,
        ),
        point(
            "qihai",
            "Qihai",
            "기해혈",
            (50.0, 66.0),
            Palm,
            &["bloating"],
            "Palm midline just above the wrist area (lower-abdomen correspondence)",
            "Press gently and hold while breathing deeply",
            45,
            Light,
        ),
        point(
            "baihui",
            "Baihui",
            "백회혈",
            (50.0, 4.0),
            Back,
            &["fatigue"],
            "Tip of the middle finger (crown correspondence)",
            "Tap lightly with a fingertip",
            30,
            Light,
        ),
        point(
            "yongquan",
            "Yongquan",
            "용천혈",
            (80.0, 20.0),
            Palm,
            &["fatigue"],
            "Upper third of the little finger (sole correspondence)",
            "Press firmly and roll the finger",
            45,
            Firm,
        ),
        point(
            "anmian",
            "Anmian",
            "안면혈",
            (30.0, 15.0),
            Back,
            &["insomnia"],
            "Outer side of the index finger tip",
            "Press softly and hold before sleep",
            60,
            Light,
        ),
    ]
}
