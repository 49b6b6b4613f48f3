//! Consumer trait for decoded packets

use crate::Result;
use crate::protocol::{
    CarDamagePacket, CarSetupsPacket, CarStatusPacket, CarTelemetryPacket, EventPacket,
    FinalClassificationPacket, LapDataPacket, LobbyInfoPacket, MotionPacket, Packet,
    ParticipantsPacket, SessionHistoryPacket, SessionPacket,
};

/// Receives every packet the listener decodes, one at a time and in arrival order.
///
/// Implementors usually override only the per-kind hooks they care about; the
/// default [`Consumer::consume`] routes each packet to its hook. Override
/// `consume` itself to see every packet regardless of kind.
///
/// Consumers run on the listener's consumer task and are called synchronously,
/// so a slow consumer backs up the datagram queue rather than reordering it.
pub trait Consumer: Send + 'static {
    /// Handle one decoded packet.
    fn consume(&mut self, packet: Packet) -> Result<()> {
        match &packet {
            Packet::Motion(p) => self.on_motion(p),
            Packet::Session(p) => self.on_session(p),
            Packet::LapData(p) => self.on_lap_data(p),
            Packet::Event(p) => self.on_event(p),
            Packet::Participants(p) => self.on_participants(p),
            Packet::CarSetups(p) => self.on_car_setups(p),
            Packet::CarTelemetry(p) => self.on_car_telemetry(p),
            Packet::CarStatus(p) => self.on_car_status(p),
            Packet::FinalClassification(p) => self.on_final_classification(p),
            Packet::LobbyInfo(p) => self.on_lobby_info(p),
            Packet::CarDamage(p) => self.on_car_damage(p),
            Packet::SessionHistory(p) => self.on_session_history(p),
        }
    }

    /// Called exactly once after the last packet has been delivered.
    fn cleanup(&mut self) -> Result<()> {
        Ok(())
    }

    fn on_motion(&mut self, _packet: &MotionPacket) -> Result<()> {
        Ok(())
    }

    fn on_session(&mut self, _packet: &SessionPacket) -> Result<()> {
        Ok(())
    }

    fn on_lap_data(&mut self, _packet: &LapDataPacket) -> Result<()> {
        Ok(())
    }

    fn on_event(&mut self, _packet: &EventPacket) -> Result<()> {
        Ok(())
    }

    fn on_participants(&mut self, _packet: &ParticipantsPacket) -> Result<()> {
        Ok(())
    }

    fn on_car_setups(&mut self, _packet: &CarSetupsPacket) -> Result<()> {
        Ok(())
    }

    fn on_car_telemetry(&mut self, _packet: &CarTelemetryPacket) -> Result<()> {
        Ok(())
    }

    fn on_car_status(&mut self, _packet: &CarStatusPacket) -> Result<()> {
        Ok(())
    }

    fn on_final_classification(&mut self, _packet: &FinalClassificationPacket) -> Result<()> {
        Ok(())
    }

    fn on_lobby_info(&mut self, _packet: &LobbyInfoPacket) -> Result<()> {
        Ok(())
    }

    fn on_car_damage(&mut self, _packet: &CarDamagePacket) -> Result<()> {
        Ok(())
    }

    fn on_session_history(&mut self, _packet: &SessionHistoryPacket) -> Result<()> {
        Ok(())
    }
}

impl Consumer for Box<dyn Consumer> {
    fn consume(&mut self, packet: Packet) -> Result<()> {
        (**self).consume(packet)
    }

    fn cleanup(&mut self) -> Result<()> {
        (**self).cleanup()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{all_fixtures, lap_data_fixture, motion_fixture};

    #[derive(Default)]
    struct LapCounter {
        laps: usize,
        motion: usize,
    }

    impl Consumer for LapCounter {
        fn on_lap_data(&mut self, _packet: &LapDataPacket) -> Result<()> {
            self.laps += 1;
            Ok(())
        }

        fn on_motion(&mut self, _packet: &MotionPacket) -> Result<()> {
            self.motion += 1;
            Ok(())
        }
    }

    #[test]
    fn default_consume_routes_by_kind() -> Result<()> {
        let mut counter = LapCounter::default();
        for data in [lap_data_fixture(), lap_data_fixture(), motion_fixture()] {
            counter.consume(Packet::decode(&data)?)?;
        }
        assert_eq!((counter.laps, counter.motion), (2, 1));
        Ok(())
    }

    #[test]
    fn boxed_consumer_forwards_to_inner_hooks() -> Result<()> {
        let mut boxed: Box<dyn Consumer> = Box::new(LapCounter::default());
        for (_, data) in all_fixtures() {
            boxed.consume(Packet::decode(&data)?)?;
        }
        boxed.cleanup()
    }
}
