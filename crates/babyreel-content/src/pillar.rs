//! The five content pillars and the copy tables attached to each.

use serde::{Deserialize, Serialize};

/// Name of the baby featured in generated copy.
pub const BABY_NAME: &str = "Gracy";

/// Channel-wide hashtags added to every idea.
const BASE_HASHTAGS: [&str; 8] = [
  "#MissGracyBaby",
  "#BabyContent",
  "#Parenting",
  "#BabyMilestones",
  "#BabyDevelopment",
  "#FamilyFun",
  "#BabyAdventures",
  "#ParentingHacks",
];

/// One of the channel's content pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PillarKind {
  DevelopmentalMilestones,
  DailyAdventures,
  ParentingHacks,
  FamilyBonding,
  FunChallenges,
}

/// Search keywords for one pillar, from broad to specific.
#[derive(Debug, Clone, Copy)]
pub struct SeoKeywords {
  pub primary: &'static [&'static str],
  pub secondary: &'static [&'static str],
  pub long_tail: &'static [&'static str],
}

impl PillarKind {
  pub const ALL: [PillarKind; 5] = [
    PillarKind::DevelopmentalMilestones,
    PillarKind::DailyAdventures,
    PillarKind::ParentingHacks,
    PillarKind::FamilyBonding,
    PillarKind::FunChallenges,
  ];

  /// Classify a pillar key (`pillar_3_parenting_hacks`) or display name
  /// (`Parenting Hacks & Tips`).
  pub fn classify(value: &str) -> Option<Self> {
    let value = value.to_ascii_lowercase();
    if value.contains("developmental") {
      Some(PillarKind::DevelopmentalMilestones)
    } else if value.contains("adventure") {
      Some(PillarKind::DailyAdventures)
    } else if value.contains("parenting") || value.contains("hack") {
      Some(PillarKind::ParentingHacks)
    } else if value.contains("family") || value.contains("bonding") {
      Some(PillarKind::FamilyBonding)
    } else if value.contains("fun") || value.contains("challenge") || value.contains("entertainment") {
      Some(PillarKind::FunChallenges)
    } else {
      None
    }
  }

  pub fn key(&self) -> &'static str {
    match self {
      PillarKind::DevelopmentalMilestones => "pillar_1_developmental_milestones",
      PillarKind::DailyAdventures => "pillar_2_daily_adventures",
      PillarKind::ParentingHacks => "pillar_3_parenting_hacks",
      PillarKind::FamilyBonding => "pillar_4_family_bonding",
      PillarKind::FunChallenges => "pillar_5_fun_challenges",
    }
  }

  pub fn name(&self) -> &'static str {
    match self {
      PillarKind::DevelopmentalMilestones => "Developmental Milestones & Learning",
      PillarKind::DailyAdventures => "Daily Adventures & Exploration",
      PillarKind::ParentingHacks => "Parenting Hacks & Tips",
      PillarKind::FamilyBonding => "Family Bonding & Traditions",
      PillarKind::FunChallenges => "Fun Challenges & Entertainment",
    }
  }

  pub fn title_templates(&self, topic: &str) -> [String; 4] {
    let baby = BABY_NAME;
    match self {
      PillarKind::DevelopmentalMilestones => [
        format!("{baby}'s Amazing {topic} Journey"),
        format!("Watch {baby} Master {topic}!"),
        format!("Developmental Milestone: {baby}'s {topic} Adventure"),
        format!("Learning Through Play: {baby}'s {topic} Experience"),
      ],
      PillarKind::DailyAdventures => [
        format!("{baby}'s First {topic} Adventure!"),
        format!("Exploring the World: {baby}'s {topic} Journey"),
        format!("Baby's Discovery: {baby}'s {topic} Experience"),
        format!("Everyday Magic: {baby}'s {topic} Moments"),
      ],
      PillarKind::ParentingHacks => [
        format!("Game-Changing {topic} Hack for Parents!"),
        format!("The Ultimate {topic} Guide for Parents"),
        format!("Parenting Pro Tips: {baby}'s {topic} Edition"),
        format!("Life-Saving {topic} Tips for New Parents"),
      ],
      PillarKind::FamilyBonding => [
        format!("Our Family {topic} Tradition"),
        format!("Heartwarming {topic} Family Moments"),
        format!("Building Family Bonds: {baby}'s {topic} Story"),
        format!("Family Traditions: {baby}'s {topic} Adventure"),
      ],
      PillarKind::FunChallenges => [
        format!("{baby}'s {topic} Challenge!"),
        format!("Baby Entertainment: {baby}'s {topic} Adventure"),
        format!("Fun Times: {baby}'s {topic} Challenge"),
        format!("Watch {baby} Take On the {topic} Challenge!"),
      ],
    }
  }

  pub fn description(&self, topic: &str) -> String {
    let baby = BABY_NAME;
    match self {
      PillarKind::DevelopmentalMilestones => format!(
        "Join us as we celebrate {baby}'s latest developmental milestone in {topic}. Watch her learn, grow, and discover new skills in this heartwarming journey that parents and caregivers will love!"
      ),
      PillarKind::DailyAdventures => format!(
        "Come along on {baby}'s latest adventure as she explores {topic}! Watch her curiosity and wonder as she discovers new things in everyday moments that make childhood so special."
      ),
      PillarKind::ParentingHacks => format!(
        "Discover the ultimate {topic} hack that every parent needs to know! In this video, we share practical tips and strategies that have made our parenting journey easier and more enjoyable."
      ),
      PillarKind::FamilyBonding => format!(
        "Experience the magic of family bonding through our {topic} tradition. Watch how these special moments strengthen our family bonds and create lasting memories for {baby} and the whole family."
      ),
      PillarKind::FunChallenges => format!(
        "Get ready for fun and entertainment with {baby}'s {topic} challenge! Watch her adorable reactions and playful moments as she takes on this exciting adventure that's perfect for the whole family."
      ),
    }
  }

  pub fn video_length(&self) -> &'static str {
    match self {
      PillarKind::DevelopmentalMilestones | PillarKind::FamilyBonding => "5-7 minutes",
      PillarKind::DailyAdventures | PillarKind::FunChallenges => "4-6 minutes",
      PillarKind::ParentingHacks => "6-8 minutes",
    }
  }

  pub fn engagement_focus(&self) -> &'static str {
    match self {
      PillarKind::DevelopmentalMilestones => "High retention through educational value",
      PillarKind::DailyAdventures => "High engagement through authentic moments",
      PillarKind::ParentingHacks => "High shareability through practical value",
      PillarKind::FamilyBonding => "High retention through emotional storytelling",
      PillarKind::FunChallenges => "High engagement through entertainment value",
    }
  }

  /// Hashtags used in idea suggestions.
  pub fn idea_hashtags(&self) -> &'static [&'static str] {
    match self {
      PillarKind::DevelopmentalMilestones => &[
        "#BabyLearning",
        "#EarlyChildhood",
        "#DevelopmentalMilestones",
        "#BabySkills",
        "#LearningThroughPlay",
        "#BabyDevelopment",
      ],
      PillarKind::DailyAdventures => &[
        "#BabyExploration",
        "#BabyAdventures",
        "#EverydayMagic",
        "#BabyDiscovery",
        "#OutdoorFun",
        "#BabyLife",
      ],
      PillarKind::ParentingHacks => &[
        "#ParentingTips",
        "#MomLife",
        "#DadLife",
        "#BabyCare",
        "#ParentingHacks",
        "#NewParent",
        "#BabyEssentials",
      ],
      PillarKind::FamilyBonding => &[
        "#FamilyBonding",
        "#FamilyTraditions",
        "#FamilyTime",
        "#ParentingJourney",
        "#FamilyMoments",
        "#LoveAndFamily",
      ],
      PillarKind::FunChallenges => &[
        "#BabyFun",
        "#Entertainment",
        "#BabyChallenge",
        "#CuteBaby",
        "#BabyReactions",
        "#FamilyFun",
      ],
    }
  }

  /// Hashtags used at the end of a video description.
  pub fn description_hashtags(&self) -> &'static [&'static str] {
    match self {
      PillarKind::DevelopmentalMilestones => &[
        "#BabyMilestones",
        "#DevelopmentalMilestones",
        "#BabyDevelopment",
        "#EarlyLearning",
        "#BabySkills",
        "#InfantDevelopment",
      ],
      PillarKind::DailyAdventures => &[
        "#BabyExploration",
        "#BabyDiscovery",
        "#BabyPlay",
        "#BabyActivities",
        "#BabyFun",
        "#EverydayMagic",
      ],
      PillarKind::ParentingHacks => &[
        "#ParentingHacks",
        "#BabyTips",
        "#NewParent",
        "#BabyCare",
        "#ParentingAdvice",
        "#MomLife",
      ],
      PillarKind::FamilyBonding => &[
        "#FamilyBonding",
        "#FamilyTime",
        "#FamilyTraditions",
        "#ParentingVlog",
        "#FamilyMoments",
        "#LoveAndFamily",
      ],
      PillarKind::FunChallenges => &[
        "#BabyChallenge",
        "#BabyFun",
        "#Entertainment",
        "#BabyReactions",
        "#CuteBaby",
        "#BabyGames",
      ],
    }
  }

  pub fn filming_tips(&self) -> &'static [&'static str] {
    match self {
      PillarKind::DevelopmentalMilestones => &[
        "Use multiple camera angles to capture different perspectives",
        "Focus on baby's facial expressions and hand movements",
        "Include text overlays for key learning points",
        "Ensure good lighting for clear visibility of developmental activities",
      ],
      PillarKind::DailyAdventures => &[
        "Capture authentic, unscripted moments",
        "Use a mix of wide shots and close-ups",
        "Follow the action naturally without being intrusive",
        "Capture genuine reactions and emotions",
      ],
      PillarKind::ParentingHacks => &[
        "Show clear before and after comparisons",
        "Use screen recording for digital tips",
        "Demonstrate the hack in real-time",
        "Include safety warnings where applicable",
      ],
      PillarKind::FamilyBonding => &[
        "Capture natural interactions between family members",
        "Use soft, warm lighting for emotional moments",
        "Include multiple family members when possible",
        "Focus on authentic emotions and connections",
      ],
      PillarKind::FunChallenges => &[
        "Capture high-energy moments with dynamic camera work",
        "Use slow motion for funny or adorable moments",
        "Include multiple angles of the challenge",
        "Capture genuine reactions and emotions",
      ],
    }
  }

  pub fn editing_suggestions(&self) -> &'static [&'static str] {
    match self {
      PillarKind::DevelopmentalMilestones => &[
        "Use calm, background music that doesn't distract from learning",
        "Add text overlays for key educational points",
        "Use smooth transitions between activities",
        "Include timestamps for different learning segments",
      ],
      PillarKind::DailyAdventures => &[
        "Use upbeat, trending music for energy",
        "Quick cuts to maintain engagement during exploration",
        "Add text overlays for location or activity descriptions",
        "Include natural sound when appropriate",
      ],
      PillarKind::ParentingHacks => &[
        "Use clear chapter markers for different tips",
        "Add text overlays for key points and takeaways",
        "Include before/after comparisons side by side",
        "Use arrows or highlights to draw attention to important details",
      ],
      PillarKind::FamilyBonding => &[
        "Use warm color grading for emotional appeal",
        "Include slow motion for special moments",
        "Add text overlays for family quotes or messages",
        "Use gentle transitions between family moments",
      ],
      PillarKind::FunChallenges => &[
        "Use fast-paced editing with quick cuts",
        "Add trending audio and sound effects",
        "Include text overlays for funny moments or reactions",
        "Use slow motion for highlight moments",
      ],
    }
  }

  pub fn seo_keywords(&self) -> SeoKeywords {
    match self {
      PillarKind::DevelopmentalMilestones => SeoKeywords {
        primary: &[
          "baby milestones",
          "developmental milestones",
          "baby development",
          "infant development",
          "baby learning",
        ],
        secondary: &[
          "first steps",
          "first words",
          "motor skills",
          "cognitive development",
          "baby growth",
        ],
        long_tail: &[
          "when do babies crawl",
          "baby development timeline",
          "infant developmental stages",
          "baby learning activities",
        ],
      },
      PillarKind::DailyAdventures => SeoKeywords {
        primary: &[
          "baby adventures",
          "baby exploration",
          "baby discovery",
          "baby play",
          "baby activities",
        ],
        secondary: &[
          "baby firsts",
          "baby experiences",
          "baby fun",
          "baby outdoor",
          "baby indoor",
        ],
        long_tail: &[
          "baby sensory play",
          "baby exploration activities",
          "baby discovery learning",
          "baby play ideas",
        ],
      },
      PillarKind::ParentingHacks => SeoKeywords {
        primary: &[
          "parenting hacks",
          "baby tips",
          "parenting advice",
          "baby care",
          "new parent tips",
        ],
        secondary: &[
          "baby sleep",
          "feeding baby",
          "diapering",
          "baby products",
          "parenting solutions",
        ],
        long_tail: &[
          "how to get baby to sleep",
          "baby feeding schedule",
          "diaper changing tips",
          "baby product reviews",
        ],
      },
      PillarKind::FamilyBonding => SeoKeywords {
        primary: &[
          "family bonding",
          "family time",
          "parenting journey",
          "family activities",
          "family traditions",
        ],
        secondary: &[
          "parenting life",
          "family moments",
          "parenting vlog",
          "family fun",
          "parenting family",
        ],
        long_tail: &[
          "family bonding activities",
          "creating family traditions",
          "parenting journey vlog",
          "family time ideas",
        ],
      },
      PillarKind::FunChallenges => SeoKeywords {
        primary: &[
          "baby challenge",
          "baby fun",
          "baby entertainment",
          "baby games",
          "baby activities",
        ],
        secondary: &[
          "baby reaction",
          "baby video",
          "cute baby",
          "baby moments",
          "baby laughs",
        ],
        long_tail: &[
          "baby sensory challenge",
          "baby taste test",
          "baby reaction video",
          "baby play challenge",
        ],
      },
    }
  }

  /// Video platform category name.
  pub fn video_category(&self) -> &'static str {
    match self {
      PillarKind::DevelopmentalMilestones | PillarKind::ParentingHacks => "Education",
      PillarKind::DailyAdventures | PillarKind::FunChallenges => "Entertainment",
      PillarKind::FamilyBonding => "Videoblogging",
    }
  }

  pub fn key_points(&self) -> &'static [&'static str] {
    match self {
      PillarKind::DevelopmentalMilestones => &[
        "👶 Track developmental milestones",
        "🧠 Learn about cognitive development",
        "🎯 Age-appropriate learning activities",
        "💡 Parenting tips and insights",
      ],
      PillarKind::DailyAdventures => &[
        "🌟 Baby's first experiences",
        "🎬 Authentic exploration moments",
        "🎈 Fun and engaging activities",
        "📸 Capturing precious memories",
      ],
      PillarKind::ParentingHacks => &[
        "🔧 Practical parenting solutions",
        "⭐ Product reviews and recommendations",
        "💝 Time-saving tips and hacks",
        "🎓 Evidence-based parenting advice",
      ],
      PillarKind::FamilyBonding => &[
        "❤️ Strengthen family bonds",
        "🏡 Create lasting traditions",
        "👨‍👩‍👧 Multi-generational moments",
        "🌈 Building family connections",
      ],
      PillarKind::FunChallenges => &[
        "🎉 Fun challenges and entertainment",
        "😂 Baby's adorable reactions",
        "🎵 Music and play activities",
        "🎊 Shareable family moments",
      ],
    }
  }

  /// Body of the main content section of a generated script.
  pub fn main_content(&self, topic: &str) -> String {
    let baby = BABY_NAME;
    match self {
      PillarKind::DevelopmentalMilestones => format!(
        "First, we set up the {topic} environment with [specific setup details]. \
         {baby} immediately shows interest by [baby's reaction]. \
         As we begin the activity, you can see how focused she becomes on [specific aspect]. \
         Her little hands work so hard to [specific action], and you can tell she's really concentrating. \
         It's amazing to watch her problem-solving skills develop as she [specific achievement]. \
         The way her eyes light up when she [success moment] just melts my heart! \
         We encourage her with [specific encouragement], and she responds with [baby's response]. \
         This type of activity is perfect for developing her [developmental skill] through {topic}."
      ),
      PillarKind::DailyAdventures => format!(
        "We start by introducing {baby} to the [environment/activity] for today's adventure. \
         At first, she's a bit curious but cautious, which is completely normal. \
         As she begins to explore, her curiosity takes over and she starts [exploration behavior]. \
         Every new discovery brings a fresh reaction - from surprise to delight! \
         I love watching her little mind work as she processes each new experience of {topic}. \
         The way she interacts with [specific element] shows how much she's learning every day. \
         Her laughter and excitement are contagious as she [fun moment]. \
         These everyday moments become such precious memories as she grows and explores the world around her."
      ),
      PillarKind::ParentingHacks => format!(
        "Let me show you the {topic} solution that has been a game-changer for us! \
         First, we start with [initial setup], which is crucial for success. \
         The key is [important technique] - this makes all the difference. \
         As we demonstrate, you'll notice [specific detail] that makes it work so well. \
         {baby}'s reaction shows how comfortable this approach is. \
         One of the best parts is [benefit] that parents often struggle with. \
         We've found that [additional tip] helps even more for [specific situation]. \
         This method has saved us so much time and reduced [common problem] significantly. \
         The results speak for themselves - [positive outcome]!"
      ),
      PillarKind::FamilyBonding => format!(
        "Today's family tradition brings us together for {topic}. \
         It's moments like these that strengthen our family bonds and create lasting memories. \
         You can see the joy in {baby}'s eyes as she [family interaction]. \
         The way [family member] engages with her shows the beautiful connections we're building. \
         These traditions aren't just activities - they're the foundation of our family culture. \
         As we share this time together, {baby} learns about [family value] through our actions. \
         The laughter, the learning, the love - it all comes together in these precious family moments. \
         I'm so grateful to document these memories that we'll cherish for years to come."
      ),
      PillarKind::FunChallenges => format!(
        "Get ready for today's exciting challenge: {topic}! \
         {baby} is so curious about [challenge elements] and her reaction is priceless. \
         As we begin, she approaches it with [initial reaction], which is absolutely adorable. \
         The challenge unfolds as she [progress through challenge], showing her [specific skills]. \
         Every moment is filled with surprise and delight as she discovers new aspects. \
         Her little problem-solving skills kick in when she [overcomes obstacle], and I'm so proud! \
         The way she [funny/successful moment] had us all laughing and cheering. \
         This challenge not only entertains but also helps develop her [developmental benefit] in such a fun way!"
      ),
    }
  }
}

/// Channel hashtags merged with the pillar's idea hashtags.
pub fn base_hashtags() -> &'static [&'static str] {
  &BASE_HASHTAGS
}

/// `"morning_routine_magic"` becomes `"Morning Routine Magic"`.
pub fn title_case(value: &str) -> String {
  value
    .split(['_', ' '])
    .filter(|word| !word.is_empty())
    .map(|word| {
      let mut chars = word.chars();
      match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
      }
    })
    .collect::<Vec<String>>()
    .join(" ")
}

/// `"morning_routine_magic"` becomes `"morning routine magic"`.
pub fn humanize(value: &str) -> String {
  value.replace('_', " ")
}
