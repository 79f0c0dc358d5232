// Hand-written fallback article. Deterministic apart from the date line.

use chrono::{DateTime, Local};

use crate::content::front_matter::{group_thousands, human_date, title_case};
use crate::content::AFFILIATE_MARKERS;
use crate::seo::SeoMetrics;

/// Render the article body (no front matter).
pub fn render_body(keyword: &str, metrics: &SeoMetrics, at: &DateTime<Local>) -> String {
    let title = title_case(keyword);
    let [aff1, aff2, aff3] = AFFILIATE_MARKERS;
    let volume = group_thousands(metrics.search_volume);
    let competition = metrics.competition;
    let difficulty = metrics.keyword_difficulty;
    let related = metrics
        .related_keywords
        .iter()
        .take(3)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    let date = human_date(at);

    format!(
        r#"# Your Friendly Guide to {title}: Everything You Need to Know

## Let's Talk About {title}

So you want to get into {keyword}? Good call. Whether you are taking your first look or you have poked at it before, this guide walks through what matters, what tends to work, and how to start seeing results without wasting weekends.

Around {volume} people search for this every month, and with {competition} competition (difficulty {difficulty}/100) a clear plan makes all the difference. Let's build one.

## What Is {title}, Really?

Strip away the jargon and {keyword} is a handful of core ideas applied consistently. Most people stall for the same reasons:
- They try to learn everything at once
- They read theory without ever practising
- They have no roadmap to follow

You do not need to be an expert by Friday. We will go one step at a time.

Starter pick: [a beginner-friendly resource]({aff1})

## Why {title} Is Worth Your Time

1. **Demand keeps growing.** People who understand {keyword} are in short supply.
2. **It changes how you think.** The habits carry over into work and everyday decisions.
3. **It shows up everywhere.** Once you know it, you will spot uses all around you.

Tools that make the journey easier: {aff2}

## Getting Started in Three Steps

### Step 1: Build the foundation
- Pick the two or three ideas that matter most
- Learn what the key terms mean in practice
- Find an example of what "good" looks like

### Step 2: Make it a habit
Fifteen minutes a day beats five hours once a month.
- Run small daily experiments
- Write down what worked
- Celebrate the small wins

### Step 3: Learn from others
- Follow a couple of newsletters on the topic
- Take a hands-on [workshop]({aff3})
- Join a local or online meetup

## Common Obstacles (and How to Get Past Them)

**"There is too much information."**
Pick one trusted source and ignore the rest for 30 days.

**"I feel like I am faking it."**
Make something small but real, even if nobody else sees it.

**"Everything changes too fast."**
Follow two or three people who filter the noise for you.

## Taking It Further

Once the basics feel comfortable:
- Combine techniques and see what happens
- Teach someone else; you will learn more than they do
- Keep a running notebook of lessons learned

You might also like: {related}

## Wrapping Up

Getting good at {keyword} is not about perfection. It is about showing up, staying curious, and applying what you learn. Pick one idea from this guide and try it today.

---

*Guide updated on {date}*"#
    )
}
