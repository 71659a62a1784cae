use crate::analyze::classifier::classify;
use crate::analyze::contribution::accumulate_contributions;
use crate::analyze::filter::user_excluded;
use crate::analyze::review_tally::count_reviews;
use crate::analyze::{
    Authorship, ClassifiedPull, Contribution, DataAnalysis, ReviewActivity, UserTally,
};
use crate::model::Settings;

pub trait Analyzer {
    fn classify_pulls(&self, settings: &Settings) -> Vec<ClassifiedPull>;
    fn reviewer_tally(&self, settings: &Settings) -> UserTally<ReviewActivity>;
    fn author_tally(&self, settings: &Settings) -> UserTally<Authorship>;
    fn contribution_tally(&self, settings: &Settings) -> UserTally<Contribution>;
}

impl Analyzer for DataAnalysis {
    fn classify_pulls(&self, settings: &Settings) -> Vec<ClassifiedPull> {
        self.pull_requests
            .iter()
            .flat_map(|(repository, pulls)| pulls.iter().map(move |pull| (repository, pull)))
            .map(|(repository, pull)| {
                let counts = count_reviews(&pull.reviews, &pull.author);
                ClassifiedPull {
                    repository: repository.clone(),
                    pull: pull.clone(),
                    bucket: classify(pull, &counts, settings.min_approvals),
                }
            })
            .collect()
    }

    /// Collaborators are seeded at zero first, then every review adds one.
    /// Reviews by the pull request's own author are not counted.
    fn reviewer_tally(&self, settings: &Settings) -> UserTally<ReviewActivity> {
        let mut tally = UserTally::new();
        for login in self.collaborators.values().flatten() {
            if !user_excluded(login, &settings.ignore_users) {
                tally.insert(login.clone(), ReviewActivity::default());
            }
        }
        for pull in self.pull_requests.values().flatten() {
            let reviews = pull
                .reviews
                .iter()
                .filter(|review| review.reviewer != pull.author)
                .filter(|review| !user_excluded(&review.reviewer, &settings.ignore_users));
            for review in reviews {
                tally.entry(review.reviewer.clone()).or_default().reviews += 1;
            }
        }
        tally
    }

    fn author_tally(&self, settings: &Settings) -> UserTally<Authorship> {
        let mut tally = UserTally::new();
        for pull in self.pull_requests.values().flatten() {
            if !user_excluded(&pull.author, &settings.ignore_users) {
                tally
                    .entry(pull.author.clone())
                    .or_insert_with(Authorship::default)
                    .pull_requests += 1;
            }
        }
        tally
    }

    fn contribution_tally(&self, settings: &Settings) -> UserTally<Contribution> {
        let mut tally = UserTally::new();
        for contributors in self.contributors.values() {
            accumulate_contributions(&mut tally, contributors, settings);
        }
        tally
    }
}
