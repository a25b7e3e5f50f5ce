use crate::randomness::RandomSource;
use crate::trial::Trial;
use crate::types::TrialError;

/// Random boarding: the first passenger lost their ticket.
///
/// Passenger 0 sits in a uniformly random seat. Every later passenger sits in their
/// ticketed seat when it is free, otherwise in a uniformly random free seat. The
/// outcome is whether the last passenger ends up in their own seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirplaneBoarding {
    passengers: usize,
}

impl AirplaneBoarding {
    pub fn new(passengers: usize) -> Result<Self, TrialError> {
        if passengers < 2 {
            return Err(TrialError::invalid(format!(
                "Boarding needs at least 2 passengers, got {}",
                passengers
            )));
        }
        Ok(Self { passengers })
    }

    pub fn passengers(&self) -> usize {
        self.passengers
    }
}

/// Free seats with O(1) removal of a given seat and of a random seat
struct FreeSeats {
    seats: Vec<usize>,
    position: Vec<Option<usize>>,
}

impl FreeSeats {
    fn new(n: usize) -> Self {
        Self {
            seats: (0..n).collect(),
            position: (0..n).map(Some).collect(),
        }
    }

    fn is_free(&self, seat: usize) -> bool {
        self.position[seat].is_some()
    }

    fn take(&mut self, seat: usize) {
        if let Some(index) = self.position[seat].take() {
            self.seats.swap_remove(index);
            if let Some(&moved) = self.seats.get(index) {
                self.position[moved] = Some(index);
            }
        }
    }

    fn take_random(&mut self, rng: &mut RandomSource) -> Result<usize, TrialError> {
        let seat = self.seats[rng.uniform_index(self.seats.len())?];
        self.take(seat);
        Ok(seat)
    }
}

impl Trial for AirplaneBoarding {
    type Outcome = bool;

    fn name(&self) -> &'static str {
        "airplane_boarding"
    }

    fn run_trial(&self, rng: &mut RandomSource) -> Result<bool, TrialError> {
        let n = self.passengers;
        // tickets[p] is the seat printed on passenger p's ticket
        let tickets = rng.permutation(n);
        let mut seated_by: Vec<Option<usize>> = vec![None; n];
        let mut free = FreeSeats::new(n);

        let first_seat = free.take_random(rng)?;
        seated_by[first_seat] = Some(0);

        for passenger in 1..n {
            let ticket = tickets[passenger];
            let seat = if free.is_free(ticket) {
                free.take(ticket);
                ticket
            } else {
                free.take_random(rng)?
            };
            seated_by[seat] = Some(passenger);
        }

        Ok(seated_by[tickets[n - 1]] == Some(n - 1))
    }
}
