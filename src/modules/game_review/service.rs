use std::sync::Arc;

use crate::{
    api::error,
    modules::game_review::{
        model::{GameReviewStats, MyReview, PublicReview, ReviewBody, ReviewWrite, SaveReviewBody},
        repository::GameReviewRepository,
        schema::GameReviewEntity,
    },
    utils::non_blank,
};

#[derive(Clone)]
pub struct GameReviewService {
    repo: Arc<dyn GameReviewRepository + Send + Sync>,
}

/// Mean rating rounded to one decimal place; zero when there are no reviews.
pub fn average_rating(reviews: &[PublicReview]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let total: i64 = reviews.iter().map(|r| i64::from(r.rating)).sum();
    let mean = total as f64 / reviews.len() as f64;
    (mean * 10.0).round() / 10.0
}

impl GameReviewService {
    pub fn with_dependencies(repo: Arc<dyn GameReviewRepository + Send + Sync>) -> Self {
        log::info!("GameReviewService initialized with dependencies");
        GameReviewService { repo }
    }

    /// Upserts the caller's review of `game_id`.
    pub async fn review_game(
        &self,
        user_id: i64,
        game_id: i64,
        body: ReviewBody,
    ) -> Result<GameReviewEntity, error::SystemError> {
        let write = ReviewWrite { game_id, rating: body.rating, review: non_blank(body.review) };
        self.repo.upsert(user_id, &write, None).await
    }

    /// Upserts a review submitted together with optional game metadata.
    pub async fn save_review(
        &self,
        user_id: i64,
        body: SaveReviewBody,
    ) -> Result<GameReviewEntity, error::SystemError> {
        let metadata = body.game_metadata();
        let write =
            ReviewWrite { game_id: body.game_id, rating: body.rating, review: non_blank(body.review) };
        self.repo.upsert(user_id, &write, metadata).await
    }

    pub async fn update_review(
        &self,
        user_id: i64,
        game_id: i64,
        body: ReviewBody,
    ) -> Result<GameReviewEntity, error::SystemError> {
        let write = ReviewWrite { game_id, rating: body.rating, review: non_blank(body.review) };
        self.repo
            .update(user_id, &write)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Review not found"))
    }

    pub async fn delete_review(&self, user_id: i64, game_id: i64) -> Result<(), error::SystemError> {
        if !self.repo.delete(user_id, game_id).await? {
            return Err(error::SystemError::not_found("Review not found"));
        }
        Ok(())
    }

    pub async fn my_review(
        &self,
        user_id: i64,
        game_id: i64,
    ) -> Result<GameReviewEntity, error::SystemError> {
        self.repo
            .find_one(user_id, game_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Review not found"))
    }

    pub async fn my_reviews(&self, user_id: i64) -> Result<Vec<MyReview>, error::SystemError> {
        self.repo.find_for_user(user_id).await
    }

    pub async fn game_reviews(&self, game_id: i64) -> Result<GameReviewStats, error::SystemError> {
        let reviews = self.repo.find_for_game(game_id).await?;
        Ok(GameReviewStats {
            average_rating: average_rating(&reviews),
            total_reviews: reviews.len(),
            reviews,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::fakes::InMemoryReviews;
    use rstest::rstest;

    fn service(reviews: &InMemoryReviews) -> GameReviewService {
        GameReviewService::with_dependencies(Arc::new(reviews.clone()))
    }

    fn public(rating: i32) -> PublicReview {
        PublicReview {
            user_id: 1,
            username: "u".into(),
            rating,
            review: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[rstest]
    #[case(vec![], 0.0)]
    #[case(vec![7], 7.0)]
    #[case(vec![7, 8], 7.5)]
    #[case(vec![10, 9, 9], 9.3)]
    #[case(vec![1, 2, 2], 1.7)]
    fn averages_round_to_one_decimal(#[case] ratings: Vec<i32>, #[case] expected: f64) {
        let reviews: Vec<_> = ratings.into_iter().map(public).collect();
        assert_eq!(average_rating(&reviews), expected);
    }

    #[actix_web::test]
    async fn resubmitting_keeps_a_single_latest_review() {
        let reviews = InMemoryReviews::default();
        let service = service(&reviews);

        let first = ReviewBody { rating: 6, review: Some("fine".into()) };
        let second = ReviewBody { rating: 9, review: Some("  grew on me  ".into()) };
        service.review_game(5, 42, first).await.unwrap();
        service.review_game(5, 42, second).await.unwrap();

        let stats = service.game_reviews(42).await.unwrap();
        assert_eq!(stats.total_reviews, 1);
        assert_eq!(stats.average_rating, 9.0);
        assert_eq!(stats.reviews[0].review.as_deref(), Some("grew on me"));
        assert!(reviews.has_game(42));
    }

    #[actix_web::test]
    async fn blank_review_text_is_stored_as_null() {
        let reviews = InMemoryReviews::default();
        let service = service(&reviews);

        let saved = service
            .review_game(5, 42, ReviewBody { rating: 4, review: Some("   ".into()) })
            .await
            .unwrap();
        assert_eq!(saved.review, None);
    }

    #[actix_web::test]
    async fn metadata_is_recorded_with_the_review() {
        let reviews = InMemoryReviews::default();
        let service = service(&reviews);

        let body = SaveReviewBody {
            game_id: 3498,
            rating: 10,
            review: None,
            game_name: Some("Grand Theft Auto V".into()),
            release_date: chrono::NaiveDate::from_ymd_opt(2013, 9, 17),
            meta_rating: Some(4.47),
        };
        service.save_review(5, body).await.unwrap();

        let mine = service.my_reviews(5).await.unwrap();
        assert_eq!(mine[0].game_name.as_deref(), Some("Grand Theft Auto V"));
    }

    #[actix_web::test]
    async fn missing_reviews_are_not_found() {
        let reviews = InMemoryReviews::default();
        let service = service(&reviews);

        let update = service.update_review(5, 1, ReviewBody { rating: 5, review: None }).await;
        assert!(matches!(update, Err(error::SystemError::NotFound(_))));
        assert!(matches!(service.delete_review(5, 1).await, Err(error::SystemError::NotFound(_))));
        assert!(matches!(service.my_review(5, 1).await, Err(error::SystemError::NotFound(_))));
    }
}
